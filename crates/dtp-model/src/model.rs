//! The capability set every dynamical model exposes.

use crate::{ModelError, Result};
use dtp_math::{DMat, DVec, horizon_steps};
use rand::RngCore;

/// State, input and output dimensions of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// State dimension.
    pub nx: usize,
    /// Input dimension.
    pub nu: usize,
    /// Observed output dimension.
    pub ny: usize,
}

impl Dimensions {
    pub fn new(nx: usize, nu: usize, ny: usize) -> Self {
        Self { nx, nu, ny }
    }
}

/// Input applied over a simulated horizon.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputSignal {
    /// No input; the model's neutral input is used at every step.
    #[default]
    None,
    /// The same input at every step.
    Constant(DVec),
    /// One input per step. Its length must equal the number of steps.
    Sequence(Vec<DVec>),
}

impl InputSignal {
    /// Input for step `i`, falling back to `neutral` when absent.
    pub fn at<'a>(&'a self, i: usize, neutral: &'a DVec) -> &'a DVec {
        match self {
            InputSignal::None => neutral,
            InputSignal::Constant(u) => u,
            InputSignal::Sequence(us) => &us[i],
        }
    }

    /// Check the signal against a horizon of `steps` steps and input size `nu`.
    pub fn validate(&self, steps: usize, nu: usize) -> Result<()> {
        match self {
            InputSignal::None => Ok(()),
            InputSignal::Constant(u) => ModelError::check_len("input", nu, u.len()),
            InputSignal::Sequence(us) => {
                ModelError::check_len("input sequence", steps, us.len())?;
                us.iter()
                    .try_for_each(|u| ModelError::check_len("input", nu, u.len()))
            }
        }
    }
}

/// A dynamical system that can be stepped, observed and sampled.
///
/// Implementations are immutable configuration values: every operation is a
/// pure function of its arguments, apart from explicit draws from the
/// random source passed in by the caller. Sampling and prediction code only
/// talks to this trait, so adding a model never touches them.
pub trait DynamicalModel: Send + Sync {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &str;

    /// `(nx, nu, ny)` of this model.
    fn dimensions(&self) -> Dimensions;

    /// Length of the initial condition drawn by [`sample`](Self::sample).
    fn initial_condition_dim(&self) -> usize {
        self.dimensions().nx
    }

    /// Lift an initial condition to a full state.
    fn full_state(&self, initial_condition: &DVec) -> Result<DVec> {
        ModelError::check_len(
            "initial condition",
            self.initial_condition_dim(),
            initial_condition.len(),
        )?;
        Ok(initial_condition.clone())
    }

    /// Advance `state` by one step of size `dt` under `input`.
    fn step(&self, state: &DVec, dt: f64, input: &DVec) -> Result<DVec>;

    /// Observed output of a state.
    fn observe(&self, state: &DVec) -> DVec;

    /// Draw a random `(initial_condition, full_state)` pair.
    fn sample(&self, rng: &mut dyn RngCore) -> (DVec, DVec);

    /// Input that leaves the dynamics unforced.
    fn neutral_input(&self) -> DVec {
        DVec::zeros(self.dimensions().nu)
    }

    /// Draw a random input vector. Defaults to the neutral input.
    fn sample_input(&self, _rng: &mut dyn RngCore) -> DVec {
        self.neutral_input()
    }

    /// Simulate `ceil(horizon / dt)` steps from `state`.
    ///
    /// Row `i` of the result is the output observed after step `i + 1`.
    fn simulate(&self, state: &DVec, horizon: f64, dt: f64, input: &InputSignal) -> Result<DMat> {
        rollout(self, state, horizon, dt, input, |x, u| self.step(x, dt, u))
    }
}

/// Shared simulation loop behind [`DynamicalModel::simulate`].
///
/// `advance` maps `(state, input)` to the next state; models that can
/// precompute a discrete transition for a fixed `dt` pass their own.
pub fn rollout<M, F>(
    model: &M,
    state: &DVec,
    horizon: f64,
    dt: f64,
    input: &InputSignal,
    mut advance: F,
) -> Result<DMat>
where
    M: DynamicalModel + ?Sized,
    F: FnMut(&DVec, &DVec) -> Result<DVec>,
{
    let dims = model.dimensions();
    let steps = horizon_steps(horizon, dt).ok_or(ModelError::InvalidHorizon { horizon, dt })?;
    ModelError::check_len("state", dims.nx, state.len())?;
    input.validate(steps, dims.nu)?;

    let neutral = model.neutral_input();
    let mut outputs = DMat::zeros(steps, dims.ny);
    let mut x = state.clone();

    for i in 0..steps {
        x = advance(&x, input.at(i, &neutral))?;
        let y = model.observe(&x);
        ModelError::check_len("output", dims.ny, y.len())?;
        outputs.row_mut(i).copy_from(&y.transpose());
    }

    Ok(outputs)
}
