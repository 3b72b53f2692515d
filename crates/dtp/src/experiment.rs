//! Sample a library, predict a new trajectory, compare against the model.

use crate::{DtpError, ExperimentConfig, ModelConfig, Result};
use dtp_math::{DMat, DVec};
use dtp_model::{DifferentialDrive, DynamicalModel, FreeFall, InputSignal};
use dtp_predict::{DirectPredictor, ErrorStats, Prediction, prediction_error};
use dtp_sampler::RandomSampler;
use tracing::info;

/// Outcome of one experiment.
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    /// Model name.
    pub model: String,
    /// Library size `N`.
    pub library_size: usize,
    /// Query initial condition.
    pub initial_condition: DVec,
    /// Trajectory simulated by the model from the query point.
    pub ground_truth: DMat,
    /// Trajectory predicted from the library.
    pub prediction: Prediction,
    /// Prediction versus ground truth.
    pub error: ErrorStats,
}

impl ExperimentReport {
    /// Human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{}: N={}, {} steps, {:?} solve\n",
            self.model,
            self.library_size,
            self.ground_truth.nrows(),
            self.prediction.path
        );
        s.push_str(&format!(
            "  initial condition: {:?}\n",
            self.initial_condition.as_slice()
        ));
        s.push_str(&format!(
            "  coefficient sum={:.12} residual={:.3e}\n",
            self.prediction.coefficient_sum(),
            self.prediction.residual
        ));
        s.push_str(&format!(
            "  rmse={:.3e} max={:.3e} final={:.3e}\n",
            self.error.rmse, self.error.max_abs, self.error.final_error
        ));
        s
    }
}

/// A configured sample-then-predict run.
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    /// Validate `config` and wrap it.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Build the configured model and run.
    pub fn run(&self) -> Result<ExperimentReport> {
        match self.config.model {
            ModelConfig::FreeFall { gamma, mass } => self.run_with(FreeFall::new(gamma, mass)?),
            ModelConfig::DifferentialDrive { wheel_base, v_max } => {
                self.run_with(DifferentialDrive::new(wheel_base)?.with_v_max(v_max)?)
            }
        }
    }

    /// Run with an explicit model; `config.model` is ignored.
    pub fn run_with<M: DynamicalModel>(&self, model: M) -> Result<ExperimentReport> {
        let cfg = &self.config;
        let mut sampler = RandomSampler::seeded(model, cfg.seed);
        let library = sampler.sample(cfg.horizon, cfg.n_samples, cfg.dt, cfg.has_input)?;

        let initial_condition = match &cfg.initial_condition {
            Some(values) => DVec::from_vec(values.clone()),
            None => sampler.draw().0,
        };

        let model = sampler.model();
        let expected = model.initial_condition_dim();
        if initial_condition.len() != expected {
            return Err(DtpError::Config(format!(
                "initial_condition has {} entries, {} expects {expected}",
                initial_condition.len(),
                model.name()
            )));
        }

        let state = model.full_state(&initial_condition)?;
        let ground_truth = model.simulate(
            &state,
            cfg.horizon,
            cfg.dt,
            &InputSignal::Constant(library.input.clone()),
        )?;

        let prediction = DirectPredictor::new(&library)?.predict(&initial_condition)?;
        let error = prediction_error(&prediction.trajectory, &ground_truth)?;

        info!(
            model = model.name(),
            n = library.len(),
            path = ?prediction.path,
            rmse = error.rmse,
            "experiment finished"
        );

        Ok(ExperimentReport {
            model: model.name().to_string(),
            library_size: library.len(),
            initial_condition,
            ground_truth,
            prediction,
            error,
        })
    }
}

/// Validate `config` and run it.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    Experiment::new(config.clone())?.run()
}
