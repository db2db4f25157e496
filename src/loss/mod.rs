//! Margin-based loss functions
//!
//! Every loss is a function of the margin z = prediction * label.
//! Derivatives are taken with respect to z.

pub mod log_loss_margin;
pub mod smooth_hinge;
pub mod squared_hinge;

pub use self::log_loss_margin::LogLossMargin;
pub use self::smooth_hinge::SmoothHingeLoss;
pub use self::squared_hinge::SquaredHingeLoss;

/// Loss function trait
pub trait LossFunction: Send + Sync {
    /// Loss for one example
    fn loss(&self, prediction: f64, label: f64) -> f64;

    /// First derivative with respect to the margin
    fn first_derivative(&self, prediction: f64, label: f64) -> f64;

    /// Second derivative with respect to the margin
    fn second_derivative(&self, prediction: f64, label: f64) -> f64;

    /// Loss name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STEP: f64 = 1e-6;

    fn losses() -> Vec<Box<dyn LossFunction>> {
        vec![
            Box::new(SquaredHingeLoss),
            Box::new(SmoothHingeLoss),
            Box::new(LogLossMargin),
        ]
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        // Margins away from the kinks at 0 and 1
        for loss in losses() {
            for &z in &[-2.0, -0.5, 0.3, 0.7, 1.5, 3.0] {
                let numeric = (loss.loss(z + STEP, 1.0) - loss.loss(z - STEP, 1.0)) / (2.0 * STEP);
                assert_relative_eq!(
                    loss.first_derivative(z, 1.0),
                    numeric,
                    epsilon = 1e-5,
                    max_relative = 1e-5
                );

                let numeric2 = (loss.first_derivative(z + STEP, 1.0)
                    - loss.first_derivative(z - STEP, 1.0))
                    / (2.0 * STEP);
                assert_relative_eq!(
                    loss.second_derivative(z, 1.0),
                    numeric2,
                    epsilon = 1e-4,
                    max_relative = 1e-4
                );
            }
        }
    }

    #[test]
    fn test_loss_depends_on_margin_only() {
        for loss in losses() {
            assert_eq!(loss.loss(0.4, -1.0), loss.loss(-0.4, 1.0));
            assert_eq!(loss.loss(2.0, 0.5), loss.loss(1.0, 1.0));
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = losses().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["SquaredHingeLoss", "SmoothHingeLoss", "LogLossMargin"]);
    }
}
