//! Trajectory tensor and sample library containers.

use crate::{Result, SamplerError};
use dtp_math::{DMat, DVec};

/// A `(steps × ny × N)` stack of equally shaped trajectories.
///
/// Stored as a `(steps·ny) × N` matrix: column `k` is trajectory `k`
/// flattened row by row, so entry `(t, j, k)` lives at row `t·ny + j`.
/// Contracting along the sample axis is then a single matrix-vector product.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryTensor {
    steps: usize,
    ny: usize,
    data: DMat,
}

impl TrajectoryTensor {
    /// Stack trajectories (each `steps × ny`) along a trailing sample axis.
    pub fn from_trajectories(trajectories: &[DMat]) -> Result<Self> {
        let Some(first) = trajectories.first() else {
            return Err(SamplerError::NoSamples(0));
        };
        let (steps, ny) = first.shape();
        let mut data = DMat::zeros(steps * ny, trajectories.len());

        for (k, traj) in trajectories.iter().enumerate() {
            if traj.shape() != (steps, ny) {
                return Err(SamplerError::Shape {
                    expected: (steps, ny),
                    actual: traj.shape(),
                });
            }
            for t in 0..steps {
                for j in 0..ny {
                    data[(t * ny + j, k)] = traj[(t, j)];
                }
            }
        }

        Ok(Self { steps, ny, data })
    }

    /// `(steps, ny, samples)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.steps, self.ny, self.data.ncols())
    }

    /// Number of time steps per trajectory.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Output dimension.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of stacked trajectories.
    pub fn nsamples(&self) -> usize {
        self.data.ncols()
    }

    /// Entry at time step `t`, output `j`, sample `k`.
    pub fn get(&self, t: usize, j: usize, k: usize) -> f64 {
        self.data[(t * self.ny + j, k)]
    }

    /// Trajectory `k` as a `steps × ny` matrix.
    pub fn trajectory(&self, k: usize) -> DMat {
        DMat::from_row_iterator(self.steps, self.ny, self.data.column(k).iter().copied())
    }

    /// Flattened `(steps·ny) × N` view used for contraction.
    pub fn as_matrix(&self) -> &DMat {
        &self.data
    }

    /// Weighted sum of trajectories, `Σ_k weights[k] · trajectory(k)`.
    pub fn contract(&self, weights: &DVec) -> Result<DMat> {
        if weights.len() != self.nsamples() {
            return Err(SamplerError::Shape {
                expected: (self.nsamples(), 1),
                actual: (weights.len(), 1),
            });
        }
        let flat = &self.data * weights;
        Ok(DMat::from_row_iterator(
            self.steps,
            self.ny,
            flat.iter().copied(),
        ))
    }
}

/// Library of `N` sampled `(initial condition, trajectory)` pairs.
///
/// Every trajectory shares the same horizon, step size and input.
#[derive(Debug, Clone)]
pub struct SampleLibrary {
    /// Initial conditions, one column per sample (`nic × N`).
    pub initial_conditions: DMat,
    /// Trajectories, sample index last (`steps × ny × N`).
    pub trajectories: TrajectoryTensor,
    /// Simulated horizon.
    pub horizon: f64,
    /// Step size.
    pub dt: f64,
    /// Input applied at every step of every trajectory.
    pub input: DVec,
}

impl SampleLibrary {
    /// Assemble a library, checking that both parts agree on `N`.
    pub fn new(
        initial_conditions: DMat,
        trajectories: TrajectoryTensor,
        horizon: f64,
        dt: f64,
        input: DVec,
    ) -> Result<Self> {
        if initial_conditions.ncols() != trajectories.nsamples() {
            return Err(SamplerError::Shape {
                expected: (initial_conditions.nrows(), trajectories.nsamples()),
                actual: initial_conditions.shape(),
            });
        }
        Ok(Self {
            initial_conditions,
            trajectories,
            horizon,
            dt,
            input,
        })
    }

    /// Number of samples `N`.
    pub fn len(&self) -> usize {
        self.initial_conditions.ncols()
    }

    /// True if the library holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Initial-condition dimension.
    pub fn dimension(&self) -> usize {
        self.initial_conditions.nrows()
    }

    /// Initial condition of sample `k`.
    pub fn initial_condition(&self, k: usize) -> DVec {
        self.initial_conditions.column(k).into_owned()
    }
}
