//! Affine prior-knowledge system.
//!
//! Stacking a row of ones under the initial-condition matrix turns
//! `P g = [x*; 1]` into "reproduce `x*` with weights that sum to one".

use dtp_math::{DMat, DVec};

/// Initial-condition matrix (`d × N`) with a trailing ones row (`(d+1) × N`).
pub fn prior_knowledge(initial_conditions: &DMat) -> DMat {
    initial_conditions
        .clone()
        .insert_row(initial_conditions.nrows(), 1.0)
}

/// New initial condition with a trailing 1.
pub fn augmented_target(initial_condition: &DVec) -> DVec {
    initial_condition.clone().push(1.0)
}

/// True if the last row of `prior` is all ones and `target` ends in 1.
pub fn has_affine_row(prior: &DMat, target: &DVec) -> bool {
    let (Some(last), Some(&t)) = (prior.nrows().checked_sub(1), target.as_slice().last()) else {
        return false;
    };
    t == 1.0 && prior.row(last).iter().all(|&v| v == 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_knowledge() {
        let ics = DMat::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let p = prior_knowledge(&ics);
        assert_eq!(p.shape(), (3, 3));
        assert_eq!(p.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        assert_eq!(p.row(2).iter().copied().collect::<Vec<_>>(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_augmented_target() {
        let x = DVec::from_vec(vec![0.5, -0.5]);
        assert_eq!(augmented_target(&x), DVec::from_vec(vec![0.5, -0.5, 1.0]));
    }

    #[test]
    fn test_has_affine_row() {
        let ics = DMat::from_row_slice(1, 2, &[1.0, 2.0]);
        let x = DVec::from_vec(vec![1.5]);
        assert!(has_affine_row(&prior_knowledge(&ics), &augmented_target(&x)));
        assert!(!has_affine_row(&ics, &augmented_target(&x)));
        assert!(!has_affine_row(&prior_knowledge(&ics), &x));
        assert!(!has_affine_row(&DMat::zeros(0, 2), &DVec::zeros(0)));
    }
}
