//! Trajectory library sampling for dtp.
//!
//! A [`RandomSampler`] draws initial conditions from a model, simulates a
//! fixed horizon from each, and packs the result into a [`SampleLibrary`]:
//! an initial-condition matrix and a [`TrajectoryTensor`], both with the
//! sample index as the last axis.

pub mod error;
pub mod library;
pub mod random;

pub use error::{Result, SamplerError};
pub use library::{SampleLibrary, TrajectoryTensor};
pub use random::{InputMode, RandomSampler};
