//! Squared hinge loss: ½ max(0, 1 - z)²

use crate::loss::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredHingeLoss;

impl LossFunction for SquaredHingeLoss {
    fn loss(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z < 1.0 {
            0.5 * (1.0 - z) * (1.0 - z)
        } else {
            0.0
        }
    }

    fn first_derivative(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z < 1.0 {
            z - 1.0
        } else {
            0.0
        }
    }

    fn second_derivative(&self, prediction: f64, label: f64) -> f64 {
        if prediction * label < 1.0 {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "SquaredHingeLoss"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_hinge_values() {
        let loss = SquaredHingeLoss;
        assert_eq!(loss.loss(-1.0, 1.0), 2.0);
        assert_eq!(loss.loss(0.5, 1.0), 0.125);
        assert_eq!(loss.loss(1.0, 1.0), 0.0);
        assert_eq!(loss.loss(3.0, 1.0), 0.0);

        assert_eq!(loss.first_derivative(-1.0, 1.0), -2.0);
        assert_eq!(loss.first_derivative(2.0, 1.0), 0.0);
        assert_eq!(loss.second_derivative(0.0, 1.0), 1.0);
        assert_eq!(loss.second_derivative(2.0, 1.0), 0.0);
    }
}
