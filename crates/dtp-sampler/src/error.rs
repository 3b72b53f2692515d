//! Error types for dtp-sampler.

use dtp_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    #[error("a library needs at least one sample, got {0}")]
    NoSamples(usize),

    #[error("horizon {horizon} with step {dt} yields no time steps")]
    InvalidHorizon { horizon: f64, dt: f64 },

    #[error("trajectory shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
