//! Complex matrix utilities for Kraus operators.
//!
//! Kraus operators are dense `ndarray` matrices of [`Complex64`]. This module
//! holds the small amount of linear algebra the channels need: fixed
//! single-qubit matrices, the conjugate transpose, the completeness sum
//! `Σ K†K` and a tolerance-based closeness test.

use ndarray::{Array2, Zip, array};
use num_complex::Complex64;

use crate::config::Tolerance;

/// A dense complex matrix.
pub type Matrix = Array2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Wrap a real number as a complex scalar.
#[inline]
pub fn re(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// The `dim × dim` identity matrix.
pub fn identity(dim: usize) -> Matrix {
    Array2::eye(dim)
}

/// A 2x2 diagonal matrix with real entries.
pub fn diag2(a: f64, d: f64) -> Matrix {
    array![[re(a), ZERO], [ZERO, re(d)]]
}

/// The lowering operator |0⟩⟨1| = [[0, 1], [0, 0]].
pub fn sigma_minus() -> Matrix {
    array![[ZERO, ONE], [ZERO, ZERO]]
}

/// The raising operator |1⟩⟨0| = [[0, 0], [1, 0]].
pub fn sigma_plus() -> Matrix {
    array![[ZERO, ZERO], [ONE, ZERO]]
}

/// Pauli-X.
pub fn pauli_x() -> Matrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y.
pub fn pauli_y() -> Matrix {
    array![[ZERO, -I], [I, ZERO]]
}

/// Pauli-Z.
pub fn pauli_z() -> Matrix {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

/// Multiply every entry by a real factor.
pub fn scaled(m: &Matrix, factor: f64) -> Matrix {
    m.mapv(|z| z * factor)
}

/// Conjugate transpose K†.
pub fn dagger(m: &Matrix) -> Matrix {
    m.t().mapv(|z| z.conj())
}

/// Completeness sum Σ_i K_i† K_i over a set of square operators of size `dim`.
pub fn completeness_sum(ops: &[Matrix], dim: usize) -> Matrix {
    ops.iter().fold(Array2::zeros((dim, dim)), |acc, k| {
        acc + dagger(k).dot(k)
    })
}

/// Largest elementwise modulus `|a - b|`. Shapes must match.
///
/// NaN if any entry differs by NaN.
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    Zip::from(a).and(b).fold(0.0_f64, |m, x, y| {
        let d = (x - y).norm();
        if d > m || d.is_nan() { d } else { m }
    })
}

/// Elementwise closeness: `|a - b| <= atol + rtol * |b|` for every entry.
///
/// Mirrors numpy's `allclose`; `b` is the reference. Returns `false` when
/// the shapes differ or any entry is NaN.
pub fn allclose(a: &Matrix, b: &Matrix, tol: Tolerance) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    Zip::from(a)
        .and(b)
        .all(|x, y| (x - y).norm() <= tol.atol + tol.rtol * y.norm())
}
