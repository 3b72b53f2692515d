//! Direct data-driven trajectory prediction.
//!
//! Given a library of `N` trajectories with initial conditions `X` (`d × N`)
//! and a new initial condition `x*`, find weights `g` with
//!
//! ```text
//! [X; 1ᵀ] g ≈ [x*; 1]
//! ```
//!
//! and predict the new trajectory as `Σ_k g_k · trajectory_k`. No model of
//! the dynamics is fitted. The ones row makes the combination affine; the
//! weights always sum to one.

pub mod error;
pub mod metrics;
pub mod predictor;
pub mod prior;
pub mod solve;

pub use error::{PredictError, Result};
pub use metrics::{ErrorStats, prediction_error};
pub use predictor::{DirectPredictor, Prediction, predict};
pub use prior::{augmented_target, prior_knowledge};
pub use solve::{Coefficients, RCOND, SolvePath, helmert_basis, solve_coefficients};
