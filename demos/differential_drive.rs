//! Differential-drive robot: predict a ten-second path from 100 random
//! samples driven by one shared random input.
//!
//! Pass a JSON configuration file as the first argument to override the
//! built-in setup.

use dtp::{ExperimentConfig, ModelConfig, run_experiment};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> dtp::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig {
            model: ModelConfig::DifferentialDrive {
                wheel_base: 0.5,
                v_max: 1.0,
            },
            horizon: 10.0,
            dt: 0.01,
            n_samples: 100,
            has_input: true,
            seed: 7,
            initial_condition: None,
        },
    };
    let report = run_experiment(&config)?;

    println!("{}", report.summary());
    println!("{:>6} {:>10} {:>10} {:>10} {:>10}", "t", "x", "x_pred", "y", "y_pred");
    let truth = &report.ground_truth;
    let pred = &report.prediction.trajectory;
    let stride = (truth.nrows() / 10).max(1);
    for i in (0..truth.nrows()).step_by(stride) {
        println!(
            "{:>6.2} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            (i + 1) as f64 * config.dt,
            truth[(i, 0)],
            pred[(i, 0)],
            truth[(i, 1)],
            pred[(i, 1)]
        );
    }
    Ok(())
}
