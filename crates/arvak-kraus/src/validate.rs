//! Kraus operator validation.
//!
//! A list of matrices is a legitimate channel on a consistent Hilbert space
//! when, checked in this order:
//!
//! 1. every operator is square,
//! 2. every operator has the shape of the first,
//! 3. every operator is a 2-D matrix (no batched or higher-rank arrays),
//! 4. the completeness relation `Σ_i K_i† K_i = I` holds within tolerance.
//!
//! Each violated rule produces its own [`KrausError`] variant. Operators
//! that pass come back unchanged, in order, as a [`KrausSet`].

use ndarray::{ArrayD, Ix2};
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use crate::config::KrausConfig;
use crate::error::{KrausError, KrausResult};
use crate::matrix::{Matrix, allclose, completeness_sum, identity, max_abs_diff};

/// An ordered set of Kraus operators satisfying `Σ K†K = I`.
///
/// Instances come only from the closed-form channel formulas or from
/// [`validate`], so every `KrausSet` describes a trace-preserving map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KrausSet {
    ops: Vec<Matrix>,
}

impl KrausSet {
    /// Wrap operators already known to be complete by construction.
    pub(crate) fn from_closed_form(ops: Vec<Matrix>) -> Self {
        debug_assert!(!ops.is_empty());
        Self { ops }
    }

    /// Number of operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if the set holds no operators. Never the case for a produced set.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Hilbert-space dimension `d` of every operator.
    pub fn dim(&self) -> usize {
        self.ops.first().map_or(0, Matrix::nrows)
    }

    /// Number of wires `n` when `d = 2^n`, otherwise `None`.
    pub fn num_wires(&self) -> Option<u32> {
        let d = self.dim();
        d.is_power_of_two().then(|| d.trailing_zeros())
    }

    /// The operators in order.
    pub fn as_slice(&self) -> &[Matrix] {
        &self.ops
    }

    /// Iterate over the operators.
    pub fn iter(&self) -> std::slice::Iter<'_, Matrix> {
        self.ops.iter()
    }

    /// Take ownership of the operators.
    pub fn into_inner(self) -> Vec<Matrix> {
        self.ops
    }
}

impl std::ops::Index<usize> for KrausSet {
    type Output = Matrix;

    fn index(&self, index: usize) -> &Matrix {
        &self.ops[index]
    }
}

impl<'a> IntoIterator for &'a KrausSet {
    type Item = &'a Matrix;
    type IntoIter = std::slice::Iter<'a, Matrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for KrausSet {
    type Item = Matrix;
    type IntoIter = std::vec::IntoIter<Matrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Validate arbitrary-rank operators with the default configuration.
pub fn validate(ops: Vec<ArrayD<Complex64>>) -> KrausResult<KrausSet> {
    validate_with(ops, &KrausConfig::default())
}

/// Validate 2-D operators with the default configuration.
pub fn validate_matrices(ops: Vec<Matrix>) -> KrausResult<KrausSet> {
    validate_with(
        ops.into_iter().map(Matrix::into_dyn).collect(),
        &KrausConfig::default(),
    )
}

/// Validate arbitrary-rank operators against `config.tolerance`.
///
/// An invalid tolerance is reported as [`KrausError::Config`] before any
/// operator is inspected.
pub fn validate_with(ops: Vec<ArrayD<Complex64>>, config: &KrausConfig) -> KrausResult<KrausSet> {
    let result = check(ops, config);
    match &result {
        Ok(set) => debug!(n_ops = set.len(), dim = set.dim(), "Kraus set accepted"),
        Err(err) => debug!(error = %err, "Kraus set rejected"),
    }
    result
}

fn check(ops: Vec<ArrayD<Complex64>>, config: &KrausConfig) -> KrausResult<KrausSet> {
    config.validate()?;

    let Some(first) = ops.first() else {
        return Err(KrausError::EmptyKrausSet);
    };

    for (index, k) in ops.iter().enumerate() {
        match *k.shape() {
            [] | [_] => {
                return Err(KrausError::InvalidRank {
                    index,
                    ndim: k.ndim(),
                });
            }
            [rows, cols, ..] if rows != cols => {
                return Err(KrausError::NonSquare { index, rows, cols });
            }
            _ => {}
        }
    }

    let expected = first.shape();
    if let Some((index, k)) = ops.iter().enumerate().find(|(_, k)| k.shape() != expected) {
        return Err(KrausError::InconsistentShape {
            index,
            expected: expected.to_vec(),
            got: k.shape().to_vec(),
        });
    }

    if let Some((index, k)) = ops.iter().enumerate().find(|(_, k)| k.ndim() != 2) {
        return Err(KrausError::InvalidRank {
            index,
            ndim: k.ndim(),
        });
    }

    let dim = expected[0];
    // Every operator is rank 2 by now, so the conversion cannot fail.
    let matrices = ops
        .into_iter()
        .enumerate()
        .map(|(index, k)| {
            let ndim = k.ndim();
            k.into_dimensionality::<Ix2>()
                .map_err(|_| KrausError::InvalidRank { index, ndim })
        })
        .collect::<KrausResult<Vec<Matrix>>>()?;

    let sum = completeness_sum(&matrices, dim);
    let id = identity(dim);
    if !allclose(&sum, &id, config.tolerance) {
        return Err(KrausError::NotTracePreserving {
            max_deviation: max_abs_diff(&sum, &id),
        });
    }

    Ok(KrausSet { ops: matrices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{pauli_x, re, scaled};
    use ndarray::{Array2, IxDyn};

    #[test]
    fn test_identity_accepted_unchanged() {
        let set = validate_matrices(vec![identity(2)]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0], identity(2));
        assert_eq!(set.num_wires(), Some(1));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(validate(vec![]).unwrap_err(), KrausError::EmptyKrausSet);
    }

    #[test]
    fn test_rank_one_rejected() {
        let v = ArrayD::from_elem(IxDyn(&[2]), re(1.0));
        assert_eq!(
            validate(vec![v]).unwrap_err(),
            KrausError::InvalidRank { index: 0, ndim: 1 }
        );
    }

    #[test]
    fn test_square_check_runs_before_shape_check() {
        // Operator 1 is both non-square and a different shape; non-square wins.
        let ops = vec![identity(2), Array2::zeros((2, 3))];
        assert_eq!(
            validate_matrices(ops).unwrap_err(),
            KrausError::NonSquare {
                index: 1,
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    fn test_rank_three_rejected_after_shape_checks() {
        let batched = ArrayD::from_elem(IxDyn(&[2, 2, 2]), re(0.5));
        let err = validate(vec![batched]).unwrap_err();
        assert_eq!(err, KrausError::InvalidRank { index: 0, ndim: 3 });
    }

    #[test]
    fn test_unitary_on_two_qubits_accepted() {
        let mut swap: Array2<Complex64> = Array2::zeros((4, 4));
        swap[[0, 0]] = re(1.0);
        swap[[1, 2]] = re(1.0);
        swap[[2, 1]] = re(1.0);
        swap[[3, 3]] = re(1.0);
        let set = validate_matrices(vec![swap]).unwrap();
        assert_eq!(set.dim(), 4);
        assert_eq!(set.num_wires(), Some(2));
    }

    #[test]
    fn test_non_power_of_two_dimension_is_structural_only() {
        let set = validate_matrices(vec![identity(3)]).unwrap();
        assert_eq!(set.dim(), 3);
        assert_eq!(set.num_wires(), None);
    }

    #[test]
    fn test_deviation_reported() {
        let ops = vec![scaled(&identity(2), 0.9), scaled(&identity(2), 0.9)];
        match validate_matrices(ops).unwrap_err() {
            KrausError::NotTracePreserving { max_deviation } => {
                assert!((max_deviation - 0.62).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let ops = vec![scaled(&pauli_x(), 1.0 + 1e-7)];
        assert!(validate_matrices(ops.clone()).is_ok());

        let strict = KrausConfig::default().with_tolerance(crate::config::Tolerance {
            atol: 1e-12,
            rtol: 0.0,
        });
        let dyn_ops = ops.into_iter().map(Matrix::into_dyn).collect();
        assert!(matches!(
            validate_with(dyn_ops, &strict).unwrap_err(),
            KrausError::NotTracePreserving { .. }
        ));
    }

    #[test]
    fn test_invalid_tolerance_rejected_before_checks() {
        let config = KrausConfig::default().with_tolerance(crate::config::Tolerance {
            atol: f64::NAN,
            rtol: 1e-5,
        });
        let err = validate_with(vec![identity(2).into_dyn()], &config).unwrap_err();
        assert!(matches!(err, KrausError::Config(_)));

        let negative = KrausConfig::default().with_tolerance(crate::config::Tolerance {
            atol: 1e-8,
            rtol: -1.0,
        });
        let err = validate_with(vec![identity(2).into_dyn()], &negative).unwrap_err();
        assert!(matches!(err, KrausError::Config(_)));
    }
}
