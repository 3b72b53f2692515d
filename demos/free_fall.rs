//! Free fall with friction: predict a trajectory from five random samples.
//!
//! The dynamics are affine in the initial condition, so a library of
//! `d + 1 = 5` samples reproduces the simulated trajectory to rounding.

use dtp::{ExperimentConfig, ModelConfig, run_experiment};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> dtp::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = ExperimentConfig {
        model: ModelConfig::FreeFall {
            gamma: 1.0,
            mass: 1.0,
        },
        horizon: 10.0,
        dt: 0.01,
        n_samples: 5,
        has_input: false,
        ..ExperimentConfig::default()
    };
    let report = run_experiment(&config)?;

    println!("{}", report.summary());
    println!("{:>6} {:>12} {:>12} {:>12} {:>12}", "t", "x", "x_pred", "y", "y_pred");
    let truth = &report.ground_truth;
    let pred = &report.prediction.trajectory;
    for i in (0..truth.nrows()).step_by(100) {
        println!(
            "{:>6.2} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            (i + 1) as f64 * config.dt,
            truth[(i, 0)],
            pred[(i, 0)],
            truth[(i, 2)],
            pred[(i, 2)]
        );
    }
    Ok(())
}
