//! Kinematic differential-drive robot.
//!
//! Pose `[x, y, θ]`, input `[v, ω]`:
//!
//! ```text
//! ẋ = v cos θ    ẏ = v sin θ    θ̇ = ω
//! ```
//!
//! advanced by one explicit Euler step per `dt`. The pose is fully observed.
//! The wheel base is part of the robot description but does not enter this
//! unicycle form of the kinematics; it is kept for callers that map `[v, ω]`
//! to wheel speeds.

use crate::{Dimensions, DynamicalModel, ModelError, Result};
use dtp_math::DVec;
use rand::RngCore;
use rand_distr::{Distribution, Uniform};

const NX: usize = 3;
const NU: usize = 2;

/// Differential-drive robot with the given wheel base.
#[derive(Debug, Clone)]
pub struct DifferentialDrive {
    wheel_base: f64,
    v_max: f64,
    sample_range: (f64, f64),
}

impl DifferentialDrive {
    /// Create a robot. `v_max` defaults to 1.0.
    pub fn new(wheel_base: f64) -> Result<Self> {
        if !wheel_base.is_finite() || wheel_base <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "wheel base must be finite and positive, got {wheel_base}"
            )));
        }
        Ok(Self {
            wheel_base,
            v_max: 1.0,
            sample_range: (0.0, 1.0),
        })
    }

    /// Upper bound on the linear velocity drawn by `sample_input`.
    pub fn with_v_max(mut self, v_max: f64) -> Result<Self> {
        if !v_max.is_finite() || v_max <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "v_max must be finite and positive, got {v_max}"
            )));
        }
        self.v_max = v_max;
        Ok(self)
    }

    /// Draw poses from `[low, high)` per component instead of `[0, 1)`.
    pub fn with_sample_range(mut self, low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) || low >= high {
            return Err(ModelError::InvalidParameter(format!(
                "sample range [{low}, {high}) is empty"
            )));
        }
        self.sample_range = (low, high);
        Ok(self)
    }

    /// Distance between the wheels.
    pub fn wheel_base(&self) -> f64 {
        self.wheel_base
    }

    /// Linear velocity bound for sampled inputs.
    pub fn v_max(&self) -> f64 {
        self.v_max
    }
}

impl DynamicalModel for DifferentialDrive {
    fn name(&self) -> &str {
        "differential_drive"
    }

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(NX, NU, NX)
    }

    fn step(&self, state: &DVec, dt: f64, input: &DVec) -> Result<DVec> {
        ModelError::check_len("state", NX, state.len())?;
        ModelError::check_len("input", NU, input.len())?;
        let (v, w) = (input[0], input[1]);
        let (sin, cos) = state[2].sin_cos();
        let rate = DVec::from_vec(vec![cos * v, sin * v, w]);
        Ok(state + rate * dt)
    }

    fn observe(&self, state: &DVec) -> DVec {
        state.clone()
    }

    fn sample(&self, rng: &mut dyn RngCore) -> (DVec, DVec) {
        let (low, high) = self.sample_range;
        let dist = Uniform::new(low, high);
        let pose = DVec::from_fn(NX, |_, _| dist.sample(&mut *rng));
        (pose.clone(), pose)
    }

    fn sample_input(&self, rng: &mut dyn RngCore) -> DVec {
        let v = Uniform::new(0.0, self.v_max).sample(&mut *rng);
        let w = Uniform::new(-1.0, 1.0).sample(&mut *rng);
        DVec::from_vec(vec![v, w])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputSignal;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dimensions() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        assert_eq!(robot.dimensions(), Dimensions::new(3, 2, 3));
        assert_eq!(robot.initial_condition_dim(), 3);
        assert_eq!(robot.wheel_base(), 0.5);
        assert_eq!(robot.v_max(), 1.0);
    }

    #[test]
    fn test_straight_line() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        let heading: f64 = 0.3;
        let pose = DVec::from_vec(vec![1.0, 2.0, heading]);
        let u = DVec::from_vec(vec![1.0, 0.0]);
        let out = robot
            .simulate(&pose, 1.0, 0.1, &InputSignal::Constant(u))
            .unwrap();
        assert_eq!(out.nrows(), 10);
        assert_eq!(out.ncols(), 3);

        let mut prev = (1.0, 2.0);
        for i in 0..10 {
            assert_relative_eq!(out[(i, 2)], heading, epsilon = 1e-12);
            let step = ((out[(i, 0)] - prev.0).powi(2) + (out[(i, 1)] - prev.1).powi(2)).sqrt();
            assert_relative_eq!(step, 0.1, epsilon = 1e-12);
            prev = (out[(i, 0)], out[(i, 1)]);
        }

        let dx = out[(9, 0)] - 1.0;
        let dy = out[(9, 1)] - 2.0;
        assert_relative_eq!((dx * dx + dy * dy).sqrt(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(dy.atan2(dx), heading, epsilon = 1e-9);
    }

    #[test]
    fn test_turn_in_place() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        let pose = DVec::from_vec(vec![0.0, 0.0, 0.0]);
        let next = robot
            .step(&pose, 0.5, &DVec::from_vec(vec![0.0, 2.0]))
            .unwrap();
        assert_relative_eq!(next[0], 0.0);
        assert_relative_eq!(next[1], 0.0);
        assert_relative_eq!(next[2], 1.0);
    }

    #[test]
    fn test_neutral_input_holds_pose() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        let pose = DVec::from_vec(vec![0.2, 0.4, 0.6]);
        let out = robot.simulate(&pose, 0.5, 0.1, &InputSignal::None).unwrap();
        for i in 0..out.nrows() {
            assert_eq!(out.row(i).transpose(), pose);
        }
    }

    #[test]
    fn test_sample_is_full_pose() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let (ic, state) = robot.sample(&mut rng);
        assert_eq!(ic, state);
        assert_eq!(ic.len(), 3);

        let u = robot.sample_input(&mut rng);
        assert!((0.0..1.0).contains(&u[0]));
        assert!((-1.0..1.0).contains(&u[1]));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(DifferentialDrive::new(0.0).is_err());
        assert!(DifferentialDrive::new(0.5).unwrap().with_v_max(-1.0).is_err());
        assert!(
            DifferentialDrive::new(0.5)
                .unwrap()
                .with_sample_range(2.0, 1.0)
                .is_err()
        );
        assert!(
            DifferentialDrive::new(0.5)
                .unwrap()
                .with_sample_range(-1e308, 1e308)
                .is_err()
        );
    }

    #[test]
    fn test_input_shape_error() {
        let robot = DifferentialDrive::new(0.5).unwrap();
        let err = robot
            .step(&DVec::zeros(3), 0.1, &DVec::zeros(1))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::Shape {
                what: "input",
                expected: 2,
                actual: 1
            }
        );
    }
}
