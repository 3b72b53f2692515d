//! Planar free fall with linear friction.
//!
//! State layout `[px, vx, py, vy, g]`. The gravity term is carried as a
//! constant fifth state so the whole system stays linear time-invariant:
//!
//! ```text
//! ṗx = vx        v̇x = -(γ/m) vx
//! ṗy = vy        v̇y = -(γ/m) vy - g + u
//! ġ  = 0
//! ```
//!
//! Each step integrates this exactly over `[0, dt]` with the force `u` held
//! constant. The observed output is `[px, vx, py, vy]`.

use crate::{Dimensions, DynamicalModel, InputSignal, ModelError, Result, rollout};
use dtp_math::{DMat, DVec, GRAVITY, ZeroOrderHold};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};

const NX: usize = 5;
const NU: usize = 1;
const NY: usize = 4;

/// Free fall with friction coefficient `gamma` and mass `m`.
#[derive(Debug, Clone)]
pub struct FreeFall {
    gamma: f64,
    mass: f64,
    sample_range: (f64, f64),
    a: DMat,
    b: DMat,
}

impl FreeFall {
    /// Create a model. Mass must be positive, friction non-negative.
    pub fn new(gamma: f64, mass: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "friction coefficient must be finite and non-negative, got {gamma}"
            )));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "mass must be finite and positive, got {mass}"
            )));
        }

        Ok(Self::from_params(gamma, mass))
    }

    /// Draw initial positions and velocities from `[low, high)` instead of `[0, 1)`.
    pub fn with_sample_range(mut self, low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) || low >= high {
            return Err(ModelError::InvalidParameter(format!(
                "sample range [{low}, {high}) is empty"
            )));
        }
        self.sample_range = (low, high);
        Ok(self)
    }

    /// Friction coefficient.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Continuous-time state matrix.
    pub fn state_matrix(&self) -> &DMat {
        &self.a
    }

    fn from_params(gamma: f64, mass: f64) -> Self {
        let k = gamma / mass;
        #[rustfmt::skip]
        let a = DMat::from_row_slice(NX, NX, &[
            0.0, 1.0, 0.0, 0.0,  0.0,
            0.0, -k,  0.0, 0.0,  0.0,
            0.0, 0.0, 0.0, 1.0,  0.0,
            0.0, 0.0, 0.0, -k,  -1.0,
            0.0, 0.0, 0.0, 0.0,  0.0,
        ]);
        let mut b = DMat::zeros(NX, NU);
        b[(3, 0)] = 1.0;

        Self {
            gamma,
            mass,
            sample_range: (0.0, 1.0),
            a,
            b,
        }
    }

    fn discretize(&self, dt: f64) -> Result<ZeroOrderHold> {
        ZeroOrderHold::new(&self.a, &self.b, dt)
            .ok_or_else(|| {
                ModelError::InvalidParameter(format!(
                    "time step must be finite and positive, got {dt}"
                ))
            })
    }
}

impl Default for FreeFall {
    fn default() -> Self {
        Self::from_params(1.0, 1.0)
    }
}

impl DynamicalModel for FreeFall {
    fn name(&self) -> &str {
        "free_fall"
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(NX, NU, NY)
    }

    fn initial_condition_dim(&self) -> usize {
        NY
    }

    fn full_state(&self, initial_condition: &DVec) -> Result<DVec> {
        ModelError::check_len("initial condition", NY, initial_condition.len())?;
        let mut state = DVec::zeros(NX);
        state.rows_mut(0, NY).copy_from(initial_condition);
        state[NX - 1] = GRAVITY;
        Ok(state)
    }

    fn step(&self, state: &DVec, dt: f64, input: &DVec) -> Result<DVec> {
        ModelError::check_len("state", NX, state.len())?;
        ModelError::check_len("input", NU, input.len())?;
        Ok(self.discretize(dt)?.step(state, input))
    }

    fn observe(&self, state: &DVec) -> DVec {
        state.rows(0, NY).into_owned()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> (DVec, DVec) {
        let (low, high) = self.sample_range;
        let dist = Uniform::new(low, high);
        let ic = DVec::from_fn(NY, |_, _| dist.sample(&mut *rng));
        let mut state = DVec::zeros(NX);
        state.rows_mut(0, NY).copy_from(&ic);
        state[NX - 1] = GRAVITY;
        (ic, state)
    }

    fn sample_input(&self, rng: &mut dyn RngCore) -> DVec {
        DVec::from_element(NU, Uniform::new(-1.0, 1.0).sample(rng))
    }

    fn simulate(&self, state: &DVec, horizon: f64, dt: f64, input: &InputSignal) -> Result<DMat> {
        // One exponential for the whole horizon.
        let zoh = match self.discretize(dt) {
            Ok(zoh) => zoh,
            Err(_) => return Err(ModelError::InvalidHorizon { horizon, dt }),
        };
        rollout(self, state, horizon, dt, input, |x, u| Ok(zoh.step(x, u)))
    }
}
