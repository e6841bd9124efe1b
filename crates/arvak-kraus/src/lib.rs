//! Arvak Kraus-operator noise channels
//!
//! This crate describes noisy quantum operations as completely-positive,
//! trace-preserving (CPTP) maps given by an ordered set of Kraus matrices
//! `{K_i}` acting as `ρ → Σ_i K_i ρ K_i†`.
//!
//! # Overview
//!
//! - **Canonical channels**: closed-form Kraus operators for amplitude
//!   damping, generalized amplitude damping, phase damping and the
//!   depolarizing channel ([`channels`]).
//! - **Validation**: [`validate`] checks that an arbitrary operator list is
//!   square, uniformly shaped, 2-D and satisfies `Σ_i K_i† K_i = I`.
//! - **Dispatch**: [`Channel`] is a closed enum over all channel kinds with a
//!   single [`Channel::kraus_matrices`] entry point and static
//!   [`ChannelSpec`] metadata.
//!
//! All functions are pure. Nothing here simulates a state; a density-matrix
//! simulator calls in to obtain matrices.
//!
//! # Example: Canonical Channel
//!
//! ```rust
//! use arvak_kraus::Channel;
//!
//! let channel = Channel::AmplitudeDamping { gamma: 0.1 };
//! let kraus = channel.kraus_matrices().unwrap();
//! assert_eq!(kraus.len(), 2);
//! assert_eq!(kraus.dim(), 2);
//! ```
//!
//! # Example: Custom Channel
//!
//! ```rust
//! use arvak_kraus::{Channel, KrausError, matrix};
//!
//! // A bit flip with probability 0.2.
//! let k0 = matrix::scaled(&matrix::identity(2), 0.8_f64.sqrt());
//! let k1 = matrix::scaled(&matrix::pauli_x(), 0.2_f64.sqrt());
//! let channel = Channel::qubit_channel(vec![k0, k1]);
//! assert!(channel.kraus_matrices().is_ok());
//!
//! // Not trace preserving.
//! let bad = Channel::qubit_channel(vec![matrix::scaled(&matrix::identity(2), 0.5)]);
//! assert!(matches!(
//!     bad.kraus_matrices(),
//!     Err(KrausError::NotTracePreserving { .. })
//! ));
//! ```
//!
//! # Supported Channels
//!
//! | Channel | Wires | Parameters | Gradient |
//! |---------|-------|------------|----------|
//! | `AmplitudeDamping` | 1 | γ | finite difference |
//! | `GeneralizedAmplitudeDamping` | 1 | γ, p | finite difference |
//! | `PhaseDamping` | 1 | γ | finite difference |
//! | `Depolarizing` | 1 | p | finite difference |
//! | `QubitChannel` | any | Kraus list | unsupported |

pub mod channel;
pub mod channels;
pub mod config;
pub mod error;
pub mod matrix;
pub mod validate;

pub use channel::{Channel, ChannelKind, ChannelSpec, GradMethod, ParamDomain, WireCount};
pub use channels::{
    amplitude_damping, depolarizing, generalized_amplitude_damping, phase_damping,
};
pub use config::{KrausConfig, Tolerance};
pub use error::{KrausError, KrausResult};
pub use matrix::Matrix;
pub use validate::{KrausSet, validate, validate_matrices, validate_with};
