//! Error types for dtp-model.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("horizon {horizon} with step {dt} yields no time steps")]
    InvalidHorizon { horizon: f64, dt: f64 },
}

impl ModelError {
    /// Fail with a shape error unless `actual == expected`.
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(ModelError::Shape {
                what,
                expected,
                actual,
            })
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
