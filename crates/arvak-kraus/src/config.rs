//! Numerical tolerance configuration.
//!
//! Supports loading configuration from:
//! 1. YAML files or strings
//! 2. Environment variables (with `ARVAK_KRAUS_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KrausError, KrausResult};

/// Absolute/relative tolerance pair for the completeness check.
///
/// Two entries `a`, `b` are close when `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute tolerance.
    #[serde(default = "default_atol")]
    pub atol: f64,

    /// Relative tolerance, scaled by the reference entry.
    #[serde(default = "default_rtol")]
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: default_atol(),
            rtol: default_rtol(),
        }
    }
}

/// Configuration for Kraus validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KrausConfig {
    /// Completeness tolerance.
    #[serde(default)]
    pub tolerance: Tolerance,
}

/// Environment variable overriding [`Tolerance::atol`].
pub const ENV_ATOL: &str = "ARVAK_KRAUS_ATOL";
/// Environment variable overriding [`Tolerance::rtol`].
pub const ENV_RTOL: &str = "ARVAK_KRAUS_RTOL";

fn default_atol() -> f64 {
    1e-8
}

fn default_rtol() -> f64 {
    1e-5
}

impl KrausConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> KrausResult<Self> {
        let config: KrausConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| KrausError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> KrausResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KrausError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults overridden by any `ARVAK_KRAUS_*` environment variables.
    ///
    /// Fails if an override yields a negative or non-finite tolerance.
    pub fn from_env() -> KrausResult<Self> {
        let config = Self::default().merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> KrausResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set and parse successfully override the
    /// current values. The result is not validated; see [`KrausConfig::load`].
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup(ENV_ATOL).and_then(|v| v.trim().parse::<f64>().ok()) {
            self.tolerance.atol = val;
        }
        if let Some(val) = lookup(ENV_RTOL).and_then(|v| v.trim().parse::<f64>().ok()) {
            self.tolerance.rtol = val;
        }
        self
    }

    /// Check the tolerances are finite and non-negative.
    pub fn validate(&self) -> KrausResult<()> {
        let Tolerance { atol, rtol } = self.tolerance;
        if !atol.is_finite() || atol < 0.0 {
            return Err(KrausError::Config(format!(
                "atol must be finite and non-negative, got {atol}"
            )));
        }
        if !rtol.is_finite() || rtol < 0.0 {
            return Err(KrausError::Config(format!(
                "rtol must be finite and non-negative, got {rtol}"
            )));
        }
        Ok(())
    }

    /// Replace the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}
