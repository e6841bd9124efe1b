//! Error types for the Kraus crate.

use thiserror::Error;

/// Errors raised while producing or validating a Kraus operator set.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KrausError {
    /// A Kraus operator maps between spaces of different dimension.
    #[error(
        "Kraus operator {index} is {rows}x{cols}; only channels with equal input and output dimensions can be applied"
    )]
    NonSquare {
        /// Position of the offending operator.
        index: usize,
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Operators in the same set have different shapes.
    #[error("Kraus operator {index} has shape {got:?}, expected {expected:?} like operator 0")]
    InconsistentShape {
        /// Position of the offending operator.
        index: usize,
        /// Shape of the first operator.
        expected: Vec<usize>,
        /// Shape of the offending operator.
        got: Vec<usize>,
    },

    /// An operator is not a 2-D matrix.
    #[error("Kraus operator {index} has rank {ndim}; operators must be (2^n, 2^n) matrices")]
    InvalidRank {
        /// Position of the offending operator.
        index: usize,
        /// Number of array axes.
        ndim: usize,
    },

    /// Σ K†K differs from the identity beyond tolerance.
    #[error("Kraus operators are not trace preserving (max |ΣK†K - I| = {max_deviation:.3e})")]
    NotTracePreserving {
        /// Largest elementwise deviation from the identity.
        max_deviation: f64,
    },

    /// No operators were supplied.
    #[error("Kraus set is empty; a channel needs at least one operator")]
    EmptyKrausSet,

    /// A physical parameter lies outside [0, 1] or is not finite.
    #[error("{channel}: parameter '{name}' must lie in [0, 1], got {value}")]
    ParameterOutOfRange {
        /// Channel name.
        channel: &'static str,
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KrausError {
    /// True for the two shape failures (non-square or inconsistent shapes).
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            KrausError::NonSquare { .. } | KrausError::InconsistentShape { .. }
        )
    }
}

/// Result type for Kraus operations.
pub type KrausResult<T> = Result<T, KrausError>;
