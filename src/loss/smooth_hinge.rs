//! Smooth hinge loss
//!
//! Linear below z = 0, quadratic on [0, 1), zero from 1 on. Continuous with a
//! continuous first derivative.

use crate::loss::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothHingeLoss;

impl LossFunction for SmoothHingeLoss {
    fn loss(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z < 0.0 {
            0.5 - z
        } else if z < 1.0 {
            0.5 * (1.0 - z) * (1.0 - z)
        } else {
            0.0
        }
    }

    fn first_derivative(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z < 0.0 {
            -1.0
        } else if z < 1.0 {
            z - 1.0
        } else {
            0.0
        }
    }

    fn second_derivative(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if (0.0..1.0).contains(&z) {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "SmoothHingeLoss"
    }
}
