//! Comparison of predicted and reference trajectories.

use crate::{PredictError, Result};
use dtp_math::DMat;

/// Error between two equally shaped trajectories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    /// Root-mean-square error over all entries.
    pub rmse: f64,
    /// Largest absolute entry-wise error.
    pub max_abs: f64,
    /// Euclidean distance between the final rows.
    pub final_error: f64,
}

/// Compare `predicted` against `reference`.
pub fn prediction_error(predicted: &DMat, reference: &DMat) -> Result<ErrorStats> {
    if predicted.shape() != reference.shape() {
        return Err(PredictError::Shape {
            expected: reference.shape(),
            actual: predicted.shape(),
        });
    }
    let diff = predicted - reference;
    let count = diff.len().max(1) as f64;
    let rmse = (diff.norm_squared() / count).sqrt();
    let max_abs = diff.amax();
    let final_error = match diff.nrows() {
        0 => 0.0,
        rows => diff.row(rows - 1).norm(),
    };

    Ok(ErrorStats {
        rmse,
        max_abs,
        final_error,
    })
}
