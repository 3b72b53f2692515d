//! Zero-order-hold discretization of continuous LTI systems.
//!
//! For `ẋ = A x + B u` with `u` held constant over `[0, dt]`:
//!
//! ```text
//! x(dt) = Ad x(0) + Bd u,   Ad = e^{A dt},   Bd = ∫₀^dt e^{A s} ds · B
//! ```
//!
//! Both blocks come out of a single exponential of the augmented matrix
//! `[[A, B], [0, 0]] · dt`, whose top row is `[Ad, Bd]`.

use crate::{DMat, DVec};

/// Discrete transition pair of a continuous LTI system under zero-order hold.
#[derive(Debug, Clone)]
pub struct ZeroOrderHold {
    /// State transition `e^{A dt}`.
    pub ad: DMat,
    /// Input matrix integrated over one step.
    pub bd: DMat,
    /// Step the pair was computed for.
    pub dt: f64,
}

impl ZeroOrderHold {
    /// Discretize `(a, b)` with step `dt`.
    ///
    /// Returns `None` if `a` is not square, `b` has the wrong row count, or
    /// `dt` is not a positive finite number.
    pub fn new(a: &DMat, b: &DMat, dt: f64) -> Option<Self> {
        let n = a.nrows();
        if a.ncols() != n || b.nrows() != n || !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        let m = b.ncols();

        let mut aug = DMat::zeros(n + m, n + m);
        aug.view_mut((0, 0), (n, n)).copy_from(a);
        aug.view_mut((0, n), (n, m)).copy_from(b);
        let phi = (aug * dt).exp();

        Some(Self {
            ad: phi.view((0, 0), (n, n)).into_owned(),
            bd: phi.view((0, n), (n, m)).into_owned(),
            dt,
        })
    }

    /// State dimension.
    pub fn nx(&self) -> usize {
        self.ad.nrows()
    }

    /// Input dimension.
    pub fn nu(&self) -> usize {
        self.bd.ncols()
    }

    /// Advance `x` by one held step with input `u`.
    pub fn step(&self, x: &DVec, u: &DVec) -> DVec {
        &self.ad * x + &self.bd * u
    }
}
