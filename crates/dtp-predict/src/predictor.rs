//! Direct data-driven trajectory prediction.

use crate::solve::{SolvePath, solve_coefficients};
use crate::{PredictError, Result, augmented_target, prior_knowledge};
use dtp_math::{DMat, DVec};
use dtp_sampler::SampleLibrary;
use tracing::debug;

/// Predicted trajectory together with the weights that produced it.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Affine weights, one per library sample.
    pub coefficients: DVec,
    /// Weighted sum of library trajectories (`steps × ny`).
    pub trajectory: DMat,
    /// Branch of the coefficient solve.
    pub path: SolvePath,
    /// Residual of the prior-knowledge system.
    pub residual: f64,
}

impl Prediction {
    /// Sum of the weights. One up to rounding.
    pub fn coefficient_sum(&self) -> f64 {
        self.coefficients.sum()
    }
}

/// Predicts trajectories for new initial conditions from one library.
///
/// The prior-knowledge matrix is built once; each call only solves for the
/// weights and contracts the trajectory tensor.
pub struct DirectPredictor<'a> {
    library: &'a SampleLibrary,
    prior: DMat,
}

impl<'a> DirectPredictor<'a> {
    pub fn new(library: &'a SampleLibrary) -> Result<Self> {
        if library.is_empty() {
            return Err(PredictError::EmptyLibrary);
        }
        if library.trajectories.nsamples() != library.len() {
            return Err(PredictError::InconsistentLibrary(format!(
                "{} initial conditions but {} trajectories",
                library.len(),
                library.trajectories.nsamples()
            )));
        }
        Ok(Self {
            library,
            prior: prior_knowledge(&library.initial_conditions),
        })
    }

    /// The `(d+1) × N` prior-knowledge matrix.
    pub fn prior(&self) -> &DMat {
        &self.prior
    }

    /// Predict the trajectory starting from `initial_condition`.
    pub fn predict(&self, initial_condition: &DVec) -> Result<Prediction> {
        let expected = self.library.dimension();
        if initial_condition.len() != expected {
            return Err(PredictError::DimensionMismatch {
                expected,
                actual: initial_condition.len(),
            });
        }
        if initial_condition.iter().any(|v| !v.is_finite()) {
            return Err(PredictError::NonFinite);
        }

        let target = augmented_target(initial_condition);
        let coeffs = solve_coefficients(&self.prior, &target)?;
        let trajectory = self.library.trajectories.contract(&coeffs.values)?;

        debug!(
            n = self.library.len(),
            path = ?coeffs.path,
            residual = coeffs.residual,
            "predicted trajectory"
        );

        Ok(Prediction {
            coefficients: coeffs.values,
            trajectory,
            path: coeffs.path,
            residual: coeffs.residual,
        })
    }
}

/// One-shot prediction from a library.
pub fn predict(library: &SampleLibrary, initial_condition: &DVec) -> Result<Prediction> {
    DirectPredictor::new(library)?.predict(initial_condition)
}
