//! Error types for dtp-predict.

use dtp_sampler::SamplerError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("initial condition has dimension {actual}, library expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("initial condition contains a non-finite value")]
    NonFinite,

    #[error("library is empty")]
    EmptyLibrary,

    #[error("inconsistent library: {0}")]
    InconsistentLibrary(String),

    #[error("prior-knowledge system must end with a ones row and a target of 1")]
    MissingAffineRow,

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("least-squares solve failed: {0}")]
    Solver(String),

    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),
}

pub type Result<T> = std::result::Result<T, PredictError>;
