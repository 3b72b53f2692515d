//! Experiment configuration.
//!
//! Configurations are plain serde structs; JSON is the on-disk format.
//!
//! ```json
//! {
//!   "model": { "kind": "differential_drive", "wheel_base": 0.5 },
//!   "horizon": 10.0,
//!   "dt": 0.01,
//!   "n_samples": 100,
//!   "has_input": true,
//!   "seed": 7
//! }
//! ```

use crate::{DtpError, Result};
use dtp_math::horizon_steps;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn one() -> f64 {
    1.0
}

/// Which model to sample, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    /// Free fall with friction.
    FreeFall {
        #[serde(default = "one")]
        gamma: f64,
        #[serde(default = "one")]
        mass: f64,
    },
    /// Kinematic differential drive.
    DifferentialDrive {
        wheel_base: f64,
        #[serde(default = "one")]
        v_max: f64,
    },
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::FreeFall {
            gamma: 1.0,
            mass: 1.0,
        }
    }
}

/// Parameters of one sample-then-predict experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Model to sample.
    pub model: ModelConfig,
    /// Simulated horizon (seconds).
    pub horizon: f64,
    /// Step size (seconds).
    pub dt: f64,
    /// Library size `N`.
    pub n_samples: usize,
    /// Drive the library with one random input instead of the neutral one.
    pub has_input: bool,
    /// RNG seed for the library and the query point.
    pub seed: u64,
    /// Query initial condition. Drawn from the model when absent.
    pub initial_condition: Option<Vec<f64>>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            horizon: 10.0,
            dt: 0.01,
            n_samples: 5,
            has_input: false,
            seed: 42,
            initial_condition: None,
        }
    }
}

impl ExperimentConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the sampling request. Model parameters are checked by the
    /// model constructors.
    pub fn validate(&self) -> Result<()> {
        if self.n_samples < 1 {
            return Err(DtpError::Config("n_samples must be at least 1".into()));
        }
        if horizon_steps(self.horizon, self.dt).is_none() {
            return Err(DtpError::Config(format!(
                "horizon {} with dt {} yields no time steps",
                self.horizon, self.dt
            )));
        }
        if let Some(ic) = &self.initial_condition
            && ic.iter().any(|v| !v.is_finite())
        {
            return Err(DtpError::Config("initial_condition must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = ExperimentConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"free_fall\""));
        let parsed = ExperimentConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ExperimentConfig::from_json(
            r#"{ "model": { "kind": "differential_drive", "wheel_base": 0.5 }, "n_samples": 100 }"#,
        )
        .unwrap();
        assert_eq!(
            config.model,
            ModelConfig::DifferentialDrive {
                wheel_base: 0.5,
                v_max: 1.0
            }
        );
        assert_eq!(config.n_samples, 100);
        assert_eq!(config.horizon, 10.0);
        assert_eq!(config.seed, 42);
        assert!(config.initial_condition.is_none());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            ExperimentConfig::from_json(r#"{ "n_samples": 0 }"#),
            Err(DtpError::Config(_))
        ));
        assert!(matches!(
            ExperimentConfig::from_json(r#"{ "dt": 0.0 }"#),
            Err(DtpError::Config(_))
        ));
        assert!(matches!(
            ExperimentConfig::from_json(r#"{ "model": { "kind": "pendulum" } }"#),
            Err(DtpError::Json(_))
        ));
    }
}
