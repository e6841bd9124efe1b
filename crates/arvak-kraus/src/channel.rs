//! Noise channel descriptors.
//!
//! [`Channel`] is a closed set of channel kinds, each carrying its own
//! parameter payload. [`Channel::kraus_matrices`] is the single dispatch
//! point that turns a bound channel into its [`KrausSet`].
//!
//! Static metadata for the surrounding framework (wire count, parameter
//! count, parameter domain, gradient support) lives on [`ChannelKind`] and
//! never depends on parameter values.

use ndarray::ArrayD;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channels;
use crate::config::KrausConfig;
use crate::error::KrausResult;
use crate::matrix::Matrix;
use crate::validate::{KrausSet, validate_with};

/// A quantum noise channel with bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Channel {
    /// Amplitude damping: energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping probability (0.0 to 1.0).
        gamma: f64,
    },

    /// Generalized amplitude damping: relaxation towards a thermal state.
    GeneralizedAmplitudeDamping {
        /// Damping probability (0.0 to 1.0).
        gamma: f64,
        /// Probability the environment is in its ground state (0.0 to 1.0).
        p: f64,
    },

    /// Phase damping: dephasing (T2 decay without energy loss).
    PhaseDamping {
        /// Dephasing probability (0.0 to 1.0).
        gamma: f64,
    },

    /// Depolarizing channel: each Pauli error with probability `p / 3`.
    Depolarizing {
        /// Total error probability (0.0 to 1.0).
        p: f64,
    },

    /// Caller-supplied Kraus operators on any number of wires.
    ///
    /// Operators use dynamic rank so that malformed input is representable
    /// and rejected by the validator rather than by the type system.
    QubitChannel {
        /// The Kraus operators, in order.
        kraus: Vec<ArrayD<Complex64>>,
    },
}

impl Channel {
    /// Build a generic channel from 2-D operators.
    pub fn qubit_channel(kraus: Vec<Matrix>) -> Self {
        Channel::QubitChannel {
            kraus: kraus.into_iter().map(|k| k.into_dyn()).collect(),
        }
    }

    /// The parameter-free kind of this channel.
    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::AmplitudeDamping { .. } => ChannelKind::AmplitudeDamping,
            Channel::GeneralizedAmplitudeDamping { .. } => {
                ChannelKind::GeneralizedAmplitudeDamping
            }
            Channel::PhaseDamping { .. } => ChannelKind::PhaseDamping,
            Channel::Depolarizing { .. } => ChannelKind::Depolarizing,
            Channel::QubitChannel { .. } => ChannelKind::QubitChannel,
        }
    }

    /// Human-readable channel name.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Static metadata for this channel's kind.
    pub fn spec(&self) -> ChannelSpec {
        self.kind().spec()
    }

    /// Real-valued parameters in declaration order.
    ///
    /// Empty for `QubitChannel`: its single declared parameter (see
    /// [`ChannelSpec::num_params`]) is the operator list, not a real scalar.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Channel::AmplitudeDamping { gamma } | Channel::PhaseDamping { gamma } => vec![*gamma],
            Channel::GeneralizedAmplitudeDamping { gamma, p } => vec![*gamma, *p],
            Channel::Depolarizing { p } => vec![*p],
            Channel::QubitChannel { .. } => Vec::new(),
        }
    }

    /// Produce the Kraus operators using the default configuration.
    pub fn kraus_matrices(&self) -> KrausResult<KrausSet> {
        self.kraus_matrices_with(&KrausConfig::default())
    }

    /// Produce the Kraus operators.
    ///
    /// Canonical channels evaluate their closed form; `QubitChannel` runs
    /// the validator with `config.tolerance` and returns the operators
    /// unchanged on success.
    pub fn kraus_matrices_with(&self, config: &KrausConfig) -> KrausResult<KrausSet> {
        debug!(channel = self.name(), "producing Kraus matrices");
        match self {
            Channel::AmplitudeDamping { gamma } => channels::amplitude_damping(*gamma),
            Channel::GeneralizedAmplitudeDamping { gamma, p } => {
                channels::generalized_amplitude_damping(*gamma, *p)
            }
            Channel::PhaseDamping { gamma } => channels::phase_damping(*gamma),
            Channel::Depolarizing { p } => channels::depolarizing(*p),
            Channel::QubitChannel { kraus } => validate_with(kraus.clone(), config),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={:.4})", gamma)
            }
            Channel::GeneralizedAmplitudeDamping { gamma, p } => {
                write!(f, "generalized_amplitude_damping(γ={:.4}, p={:.4})", gamma, p)
            }
            Channel::PhaseDamping { gamma } => write!(f, "phase_damping(γ={:.4})", gamma),
            Channel::Depolarizing { p } => write!(f, "depolarizing(p={:.4})", p),
            Channel::QubitChannel { kraus } => write!(f, "qubit_channel({} ops)", kraus.len()),
        }
    }
}

/// Channel kind without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// See [`Channel::AmplitudeDamping`].
    AmplitudeDamping,
    /// See [`Channel::GeneralizedAmplitudeDamping`].
    GeneralizedAmplitudeDamping,
    /// See [`Channel::PhaseDamping`].
    PhaseDamping,
    /// See [`Channel::Depolarizing`].
    Depolarizing,
    /// See [`Channel::QubitChannel`].
    QubitChannel,
}

impl ChannelKind {
    /// Every kind, in declaration order.
    pub const ALL: [ChannelKind; 5] = [
        ChannelKind::AmplitudeDamping,
        ChannelKind::GeneralizedAmplitudeDamping,
        ChannelKind::PhaseDamping,
        ChannelKind::Depolarizing,
        ChannelKind::QubitChannel,
    ];

    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::AmplitudeDamping => "amplitude_damping",
            ChannelKind::GeneralizedAmplitudeDamping => "generalized_amplitude_damping",
            ChannelKind::PhaseDamping => "phase_damping",
            ChannelKind::Depolarizing => "depolarizing",
            ChannelKind::QubitChannel => "qubit_channel",
        }
    }

    /// Fixed metadata for this kind.
    pub fn spec(self) -> ChannelSpec {
        let canonical = |num_params| ChannelSpec {
            name: self.name(),
            num_wires: WireCount::Exactly(1),
            num_params,
            param_domain: ParamDomain::RealScalars,
            grad_method: Some(GradMethod::FiniteDifference),
        };
        match self {
            ChannelKind::AmplitudeDamping
            | ChannelKind::PhaseDamping
            | ChannelKind::Depolarizing => canonical(1),
            ChannelKind::GeneralizedAmplitudeDamping => canonical(2),
            ChannelKind::QubitChannel => ChannelSpec {
                name: self.name(),
                num_wires: WireCount::Any,
                num_params: 1,
                param_domain: ParamDomain::MatrixList,
                grad_method: None,
            },
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only metadata a framework needs to bind and differentiate a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelSpec {
    /// Channel name.
    pub name: &'static str,
    /// Wires the channel acts on.
    pub num_wires: WireCount,
    /// Number of parameters.
    ///
    /// The operator list of `QubitChannel` counts as one, so only the
    /// canonical kinds have `Channel::params().len() == num_params`.
    pub num_params: usize,
    /// What kind of parameters the channel takes.
    pub param_domain: ParamDomain,
    /// Supported differentiation method, `None` if unsupported.
    pub grad_method: Option<GradMethod>,
}

/// Wire-count requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireCount {
    /// Exactly this many wires.
    Exactly(u32),
    /// Any number of wires; the operator dimension decides.
    Any,
}

impl WireCount {
    /// True if `n` wires satisfy this requirement.
    pub fn accepts(self, n: u32) -> bool {
        match self {
            WireCount::Exactly(k) => k == n,
            WireCount::Any => true,
        }
    }
}

/// Parameter domain tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamDomain {
    /// Real scalar parameters.
    RealScalars,
    /// A list of matrices.
    MatrixList,
}

impl ParamDomain {
    /// Short tag: `"R"` or `"L"`.
    pub fn tag(self) -> &'static str {
        match self {
            ParamDomain::RealScalars => "R",
            ParamDomain::MatrixList => "L",
        }
    }
}

/// Differentiation method tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradMethod {
    /// Finite differences.
    FiniteDifference,
}

impl GradMethod {
    /// Short tag: `"F"`.
    pub fn tag(self) -> &'static str {
        match self {
            GradMethod::FiniteDifference => "F",
        }
    }
}
