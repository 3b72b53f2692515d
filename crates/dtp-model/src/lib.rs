//! Dynamical models for dtp.
//!
//! A model is an immutable description of a system that can be stepped
//! forward, observed, and asked for random initial conditions. Two models
//! ship with the crate:
//!
//! - [`FreeFall`]: planar projectile with linear friction, integrated exactly
//!   under zero-order hold.
//! - [`DifferentialDrive`]: unicycle kinematics with an explicit Euler step.
//!
//! Randomness is always supplied by the caller as a `&mut dyn RngCore`.

pub mod differential_drive;
pub mod error;
pub mod free_fall;
pub mod model;

pub use differential_drive::DifferentialDrive;
pub use error::{ModelError, Result};
pub use free_fall::FreeFall;
pub use model::{Dimensions, DynamicalModel, InputSignal, rollout};
