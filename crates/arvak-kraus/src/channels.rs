//! Closed-form Kraus operators for the canonical single-qubit noise channels.
//!
//! Every formula is complete by algebraic construction for parameters in
//! `[0, 1]`, so the output is wrapped in a [`KrausSet`] without running the
//! numerical validator. Parameters outside `[0, 1]` (or NaN) are rejected
//! with [`KrausError::ParameterOutOfRange`].
//!
//! | Channel | Parameters | Operators |
//! |---------|------------|-----------|
//! | Amplitude damping | γ | 2 |
//! | Generalized amplitude damping | γ, p | 4 |
//! | Phase damping | γ | 2 |
//! | Depolarizing | p | 4 |

use tracing::debug;

use crate::error::{KrausError, KrausResult};
use crate::matrix::{
    Matrix, diag2, identity, pauli_x, pauli_y, pauli_z, scaled, sigma_minus, sigma_plus,
};
use crate::validate::KrausSet;

/// Reject a probability outside `[0, 1]`.
pub(crate) fn check_probability(
    channel: &'static str,
    name: &'static str,
    value: f64,
) -> KrausResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(KrausError::ParameterOutOfRange {
            channel,
            name,
            value,
        })
    }
}

fn finish(channel: &'static str, ops: Vec<Matrix>) -> KrausSet {
    debug!(channel, n_ops = ops.len(), "produced closed-form Kraus set");
    KrausSet::from_closed_form(ops)
}

/// Amplitude damping (energy relaxation, T1).
///
/// ```text
/// K0 = [[1, 0], [0, √(1-γ)]]
/// K1 = [[0, √γ], [0, 0]]
/// ```
///
/// `γ = 0` is the identity channel; `γ = 1` resets every state to |0⟩.
pub fn amplitude_damping(gamma: f64) -> KrausResult<KrausSet> {
    const NAME: &str = "amplitude_damping";
    check_probability(NAME, "gamma", gamma)?;

    let k0 = diag2(1.0, (1.0 - gamma).sqrt());
    let k1 = scaled(&sigma_minus(), gamma.sqrt());
    Ok(finish(NAME, vec![k0, k1]))
}

/// Generalized amplitude damping: energy exchange with a finite-temperature bath.
///
/// `gamma` is the damping probability and `p` the probability that the
/// environment is in its ground state.
///
/// ```text
/// K0 = √p     · [[1, 0], [0, √(1-γ)]]
/// K1 = √p     · [[0, √γ], [0, 0]]
/// K2 = √(1-p) · [[√(1-γ), 0], [0, 1]]
/// K3 = √(1-p) · [[0, 0], [√γ, 0]]
/// ```
///
/// With `p = 1` this is exactly [`amplitude_damping`] plus two zero operators.
pub fn generalized_amplitude_damping(gamma: f64, p: f64) -> KrausResult<KrausSet> {
    const NAME: &str = "generalized_amplitude_damping";
    check_probability(NAME, "gamma", gamma)?;
    check_probability(NAME, "p", p)?;

    let sp = p.sqrt();
    let sq = (1.0 - p).sqrt();
    let damp = (1.0 - gamma).sqrt();
    let sg = gamma.sqrt();

    let k0 = scaled(&diag2(1.0, damp), sp);
    let k1 = scaled(&sigma_minus(), sp * sg);
    let k2 = scaled(&diag2(damp, 1.0), sq);
    let k3 = scaled(&sigma_plus(), sq * sg);
    Ok(finish(NAME, vec![k0, k1, k2, k3]))
}

/// Phase damping (pure dephasing).
///
/// ```text
/// K0 = [[1, 0], [0, √(1-γ)]]
/// K1 = [[0, 0], [0, √γ]]
/// ```
///
/// Populations are preserved; coherences shrink by `√(1-γ)`.
pub fn phase_damping(gamma: f64) -> KrausResult<KrausSet> {
    const NAME: &str = "phase_damping";
    check_probability(NAME, "gamma", gamma)?;

    let k0 = diag2(1.0, (1.0 - gamma).sqrt());
    let k1 = diag2(0.0, gamma.sqrt());
    Ok(finish(NAME, vec![k0, k1]))
}

/// Symmetric depolarizing channel.
///
/// Each Pauli error is applied with probability `p / 3`:
///
/// ```text
/// K0 = √(1-p) · I,  K1 = √(p/3) · X,  K2 = √(p/3) · Y,  K3 = √(p/3) · Z
/// ```
pub fn depolarizing(p: f64) -> KrausResult<KrausSet> {
    const NAME: &str = "depolarizing";
    check_probability(NAME, "p", p)?;

    let s = (p / 3.0).sqrt();
    let k0 = scaled(&identity(2), (1.0 - p).sqrt());
    let k1 = scaled(&pauli_x(), s);
    let k2 = scaled(&pauli_y(), s);
    let k3 = scaled(&pauli_z(), s);
    Ok(finish(NAME, vec![k0, k1, k2, k3]))
}
