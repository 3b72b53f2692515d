//! Error types for the dtp umbrella crate.

use dtp_model::ModelError;
use dtp_predict::PredictError;
use dtp_sampler::SamplerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DtpError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("prediction error: {0}")]
    Predict(#[from] PredictError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DtpError>;
