//! Affine combination coefficients.
//!
//! Solves `P g ≈ [x*; 1]` for the weight vector `g`, where the last row of
//! `P` is all ones. Two paths:
//!
//! 1. **Exact.** `P` is square and its reciprocal condition number is above
//!    [`RCOND`]: LU solve, `g = P⁻¹ [x*; 1]`.
//! 2. **Least squares.** Any other shape, or a singular / ill-conditioned
//!    square `P`. The ones row is kept as a hard constraint by writing
//!
//!    ```text
//!    g = 1/N + Z h,   Z = orthonormal basis of {g : Σ g = 0}
//!    ```
//!
//!    and taking the pseudo-inverse solution of `(X Z) h = x* − X 1/N`.
//!    Since `1/N ⟂ Z h`, `‖g‖² = 1/N + ‖h‖²`, so the minimum-norm `h` gives
//!    the minimum-norm `g` among all best fits. When the library spans the
//!    target this coincides with `pinv(P) [x*; 1]`; when it does not, the
//!    weights still sum to one and the error lands on the state rows.

use crate::prior::has_affine_row;
use crate::{PredictError, Result};
use dtp_math::{DMat, DVec};
use tracing::{debug, warn};

/// Relative singular-value cutoff. A square system whose reciprocal
/// condition number falls below it skips the exact path, and the
/// pseudo-inverse treats singular values below `RCOND · σ_max` as zero.
pub const RCOND: f64 = 1e-12;

/// Which branch produced the coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePath {
    /// Square, well-conditioned system solved directly.
    Exact,
    /// Minimum-norm least squares with the sum-to-one row enforced.
    LeastSquares,
}

/// Combination weights and how they were obtained.
#[derive(Debug, Clone)]
pub struct Coefficients {
    /// One weight per library sample.
    pub values: DVec,
    /// Branch taken.
    pub path: SolvePath,
    /// `‖P g − target‖₂`.
    pub residual: f64,
}

impl Coefficients {
    /// Sum of the weights. One up to rounding.
    pub fn sum(&self) -> f64 {
        self.values.sum()
    }
}

/// Solve `prior · g ≈ target`.
///
/// `prior` must end with a ones row and `target` with a 1; see
/// [`prior_knowledge`](crate::prior_knowledge) and
/// [`augmented_target`](crate::augmented_target).
pub fn solve_coefficients(prior: &DMat, target: &DVec) -> Result<Coefficients> {
    let (rows, n) = prior.shape();
    if n == 0 {
        return Err(PredictError::EmptyLibrary);
    }
    if target.len() != rows {
        return Err(PredictError::DimensionMismatch {
            expected: rows,
            actual: target.len(),
        });
    }
    if !has_affine_row(prior, target) {
        return Err(PredictError::MissingAffineRow);
    }

    let (values, path) = if rows == n {
        match solve_exact(prior, target) {
            Some(g) => (g, SolvePath::Exact),
            None => {
                warn!(
                    n,
                    "prior-knowledge matrix is singular or ill-conditioned, falling back to least squares"
                );
                (solve_least_squares(prior, target)?, SolvePath::LeastSquares)
            }
        }
    } else {
        debug!(rows, n, "prior-knowledge matrix is not square, using least squares");
        (solve_least_squares(prior, target)?, SolvePath::LeastSquares)
    };

    let residual = (prior * &values - target).norm();
    debug!(?path, residual, sum = values.sum(), "solved combination weights");

    Ok(Coefficients {
        values,
        path,
        residual,
    })
}

/// LU solve of a square, well-conditioned system.
fn solve_exact(prior: &DMat, target: &DVec) -> Option<DVec> {
    let sv = prior.singular_values();
    let smax = sv.max();
    let smin = sv.min();
    if !(smax > 0.0) || smin / smax < RCOND {
        return None;
    }
    prior.clone().lu().solve(target)
}

/// Minimum-norm least squares on the affine subspace `Σ g = 1`.
fn solve_least_squares(prior: &DMat, target: &DVec) -> Result<DVec> {
    let (rows, n) = prior.shape();
    let mean = DVec::from_element(n, 1.0 / n as f64);
    if n == 1 {
        return Ok(mean);
    }

    let d = rows - 1;
    if d == 0 {
        return Ok(mean);
    }
    let x = prior.rows(0, d);
    let rhs: DVec = target.rows(0, d).into_owned() - &x * &mean;
    let z = helmert_basis(n);
    let xz = &x * &z;

    let svd = xz.svd(true, true);
    let eps = RCOND * svd.singular_values.max();
    let h = svd
        .solve(&rhs, eps)
        .map_err(|e| PredictError::Solver(e.to_string()))?;

    Ok(mean + z * h)
}

/// Orthonormal basis of the vectors in `R^n` whose entries sum to zero.
///
/// Column `k` is `(1, …, 1, −(k+1), 0, …) / √((k+1)(k+2))` with `k + 1` ones.
pub fn helmert_basis(n: usize) -> DMat {
    let mut z = DMat::zeros(n, n.saturating_sub(1));
    for k in 0..n.saturating_sub(1) {
        let m = (k + 1) as f64;
        let scale = 1.0 / (m * (m + 1.0)).sqrt();
        for i in 0..=k {
            z[(i, k)] = scale;
        }
        z[(k + 1, k)] = -m * scale;
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{augmented_target, prior_knowledge};
    use approx::assert_relative_eq;

    fn square_library() -> DMat {
        // 2-D initial conditions, N = 3: a non-degenerate triangle.
        DMat::from_row_slice(2, 3, &[0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn test_helmert_basis_is_orthonormal() {
        for n in 1..6 {
            let z = helmert_basis(n);
            assert_eq!(z.shape(), (n, n - 1));
            let gram = z.transpose() * &z;
            for i in 0..n - 1 {
                for j in 0..n - 1 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(gram[(i, j)], expected, epsilon = 1e-12);
                }
                assert_relative_eq!(z.column(i).sum(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_exact_path() {
        let prior = prior_knowledge(&square_library());
        let target = augmented_target(&DVec::from_vec(vec![0.25, 0.5]));
        let c = solve_coefficients(&prior, &target).unwrap();
        assert_eq!(c.path, SolvePath::Exact);
        assert_relative_eq!(c.values[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(c.values[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(c.values[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.sum(), 1.0, epsilon = 1e-12);
        assert!(c.residual < 1e-12);
    }

    #[test]
    fn test_singular_square_falls_back() {
        // Collinear initial conditions make the square system singular.
        let ics = DMat::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        let prior = prior_knowledge(&ics);
        let target = augmented_target(&DVec::from_vec(vec![1.5, 1.5]));
        let c = solve_coefficients(&prior, &target).unwrap();
        assert_eq!(c.path, SolvePath::LeastSquares);
        assert_relative_eq!(c.sum(), 1.0, epsilon = 1e-12);
        assert!(c.residual < 1e-10);

        // Minimum-norm among exact solutions.
        let pinv = prior.clone().pseudo_inverse(1e-12).unwrap();
        let expected = pinv * &target;
        for k in 0..3 {
            assert_relative_eq!(c.values[k], expected[k], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_underdetermined_is_minimum_norm() {
        let ics = DMat::from_row_slice(2, 5, &[
            0.1, 0.9, 0.3, 0.7, 0.5, //
            0.2, 0.4, 0.8, 0.6, 0.1,
        ]);
        let prior = prior_knowledge(&ics);
        let target = augmented_target(&DVec::from_vec(vec![0.45, 0.35]));
        let c = solve_coefficients(&prior, &target).unwrap();
        assert_eq!(c.path, SolvePath::LeastSquares);
        assert!(c.residual < 1e-10);

        let expected = prior.clone().pseudo_inverse(1e-12).unwrap() * &target;
        for k in 0..5 {
            assert_relative_eq!(c.values[k], expected[k], epsilon = 1e-9);
        }
        assert_relative_eq!(c.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overdetermined_keeps_affine_constraint() {
        // Two samples cannot reproduce an arbitrary 2-D point.
        let ics = DMat::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 0.0]);
        let prior = prior_knowledge(&ics);
        let target = augmented_target(&DVec::from_vec(vec![0.3, 0.8]));
        let c = solve_coefficients(&prior, &target).unwrap();
        assert_eq!(c.path, SolvePath::LeastSquares);
        assert_relative_eq!(c.sum(), 1.0, epsilon = 1e-12);
        // Best fit along the segment projects x onto it.
        assert_relative_eq!(c.values[0], 0.7, epsilon = 1e-12);
        assert_relative_eq!(c.values[1], 0.3, epsilon = 1e-12);
        assert_relative_eq!(c.residual, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample() {
        let ics = DMat::from_row_slice(2, 1, &[0.3, 0.4]);
        let prior = prior_knowledge(&ics);
        let target = augmented_target(&DVec::from_vec(vec![0.0, 0.0]));
        let c = solve_coefficients(&prior, &target).unwrap();
        assert_eq!(c.values, DVec::from_vec(vec![1.0]));
        assert_relative_eq!(c.residual, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_malformed_systems() {
        let prior = prior_knowledge(&square_library());
        assert_eq!(
            solve_coefficients(&prior, &DVec::zeros(2)).unwrap_err(),
            PredictError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            solve_coefficients(&square_library(), &DVec::from_vec(vec![0.0, 1.0])).unwrap_err(),
            PredictError::MissingAffineRow
        );
        assert_eq!(
            solve_coefficients(&DMat::zeros(3, 0), &DVec::zeros(3)).unwrap_err(),
            PredictError::EmptyLibrary
        );
    }
}
