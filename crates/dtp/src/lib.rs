//! dtp: data-driven trajectory prediction.
//!
//! Predicts the trajectory of a dynamical system from a new initial
//! condition as an affine combination of trajectories in a randomly sampled
//! library, without fitting a model of the dynamics.
//!
//! This is the umbrella crate: it re-exports the model, sampler and
//! predictor crates and adds a configurable [`Experiment`] driver that runs
//! the whole pipeline and compares the prediction with the model's own
//! simulation.
//!
//! ```no_run
//! use dtp::{DifferentialDrive, DirectPredictor, RandomSampler};
//!
//! let robot = DifferentialDrive::new(0.5).unwrap();
//! let mut sampler = RandomSampler::seeded(robot, 7);
//! let library = sampler.sample(10.0, 100, 0.01, true).unwrap();
//! let (query, _) = sampler.draw();
//! let prediction = DirectPredictor::new(&library).unwrap().predict(&query).unwrap();
//! assert!((prediction.coefficient_sum() - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod experiment;

pub use config::{ExperimentConfig, ModelConfig};
pub use error::{DtpError, Result};
pub use experiment::{Experiment, ExperimentReport, run_experiment};

pub use dtp_math::{self, DMat, DVec, GRAVITY};
pub use dtp_model::{
    self, Dimensions, DifferentialDrive, DynamicalModel, FreeFall, InputSignal, ModelError,
};
pub use dtp_predict::{
    self, DirectPredictor, ErrorStats, Prediction, PredictError, SolvePath, predict,
    prediction_error,
};
pub use dtp_sampler::{
    self, InputMode, RandomSampler, SampleLibrary, SamplerError, TrajectoryTensor,
};
