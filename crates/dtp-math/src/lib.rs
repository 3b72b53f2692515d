//! Linear algebra aliases and time-discretization helpers for dtp.
//!
//! Everything downstream works on dynamically sized nalgebra vectors and
//! matrices; models pick their own dimensions at runtime.

pub mod zoh;

pub use zoh::ZeroOrderHold;

use nalgebra as na;

/// Dynamic vector.
pub type DVec = na::DVector<f64>;
/// Dynamic matrix.
pub type DMat = na::DMatrix<f64>;

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Number of forward steps needed to cover a horizon `t` with step `dt`.
///
/// Matches `ceil(t / dt)`, with the ratio nudged down by a relative
/// `1e-12` so that horizons that are exact multiples of `dt` in decimal
/// (e.g. `t = 1.0`, `dt = 0.1`) do not gain a spurious extra step from
/// rounding. Returns `None` for non-positive or non-finite inputs.
pub fn horizon_steps(t: f64, dt: f64) -> Option<usize> {
    if !(t.is_finite() && dt.is_finite()) || t <= 0.0 || dt <= 0.0 {
        return None;
    }
    let ratio = t / dt;
    if !ratio.is_finite() {
        return None;
    }
    let steps = (ratio * (1.0 - 1e-12)).ceil();
    if steps < 1.0 || steps > usize::MAX as f64 {
        return None;
    }
    Some(steps as usize)
}
