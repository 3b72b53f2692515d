//! Random sampling of trajectory libraries.

use crate::{Result, SampleLibrary, SamplerError, TrajectoryTensor};
use dtp_math::{DMat, DVec, horizon_steps};
use dtp_model::{DynamicalModel, InputSignal, ModelError};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

/// How the library input is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// The model's neutral input.
    Neutral,
    /// One input drawn from the model, shared by every trajectory.
    Random,
    /// A caller-supplied input, shared by every trajectory.
    Fixed(DVec),
}

/// Builds libraries by simulating a model from random initial conditions.
///
/// All random draws come from the injected generator, in sample order, so
/// a seeded sampler produces the same library every time. Simulations run
/// in parallel; each writes only its own column.
pub struct RandomSampler<M, R = StdRng> {
    model: M,
    rng: R,
}

impl<M: DynamicalModel> RandomSampler<M, StdRng> {
    /// Sampler backed by a `StdRng` seeded with `seed`.
    pub fn seeded(model: M, seed: u64) -> Self {
        Self::new(model, StdRng::seed_from_u64(seed))
    }
}

impl<M: DynamicalModel, R: RngCore> RandomSampler<M, R> {
    /// Create a sampler from a model and a random source.
    pub fn new(model: M, rng: R) -> Self {
        Self { model, rng }
    }

    /// The sampled model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Draw one more `(initial_condition, full_state)` pair from the same
    /// random stream, e.g. the query point of an experiment.
    pub fn draw(&mut self) -> (DVec, DVec) {
        self.model.sample(&mut self.rng)
    }

    /// Sample `n` trajectories of length `ceil(horizon / dt)`.
    ///
    /// With `has_input` set, one random input is drawn for the whole library
    /// and held at every step; otherwise the neutral input is used.
    pub fn sample(
        &mut self,
        horizon: f64,
        n: usize,
        dt: f64,
        has_input: bool,
    ) -> Result<SampleLibrary> {
        let mode = if has_input {
            InputMode::Random
        } else {
            InputMode::Neutral
        };
        self.sample_with(horizon, n, dt, mode)
    }

    /// Sample `n` trajectories under an explicit input mode.
    pub fn sample_with(
        &mut self,
        horizon: f64,
        n: usize,
        dt: f64,
        mode: InputMode,
    ) -> Result<SampleLibrary> {
        if n < 1 {
            return Err(SamplerError::NoSamples(n));
        }
        let steps =
            horizon_steps(horizon, dt).ok_or(SamplerError::InvalidHorizon { horizon, dt })?;

        let dims = self.model.dimensions();
        let input = match mode {
            InputMode::Neutral => self.model.neutral_input(),
            InputMode::Random => self.model.sample_input(&mut self.rng),
            InputMode::Fixed(u) => {
                ModelError::check_len("input", dims.nu, u.len())?;
                u
            }
        };

        let draws: Vec<(DVec, DVec)> = (0..n)
            .map(|_| self.model.sample(&mut self.rng))
            .collect();

        debug!(
            model = self.model.name(),
            n,
            steps,
            ny = dims.ny,
            input = ?input.as_slice(),
            "sampling trajectory library"
        );

        let signal = InputSignal::Constant(input.clone());
        let model = &self.model;
        let trajectories = draws
            .par_iter()
            .map(|(_, state)| model.simulate(state, horizon, dt, &signal))
            .collect::<std::result::Result<Vec<DMat>, ModelError>>()?;

        let nic = draws[0].0.len();
        let mut initial_conditions = DMat::zeros(nic, n);
        for (k, (ic, _)) in draws.iter().enumerate() {
            initial_conditions.set_column(k, ic);
        }

        let trajectories = TrajectoryTensor::from_trajectories(&trajectories)?;
        SampleLibrary::new(initial_conditions, trajectories, horizon, dt, input)
    }
}
