//! Logistic loss shifted to the margin: log(1 + e^(1 - z))
//!
//! Each branch keeps the exponent non-positive so large |z| cannot overflow.

use crate::loss::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogLossMargin;

impl LossFunction for LogLossMargin {
    fn loss(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z >= 1.0 {
            (1.0 - z).exp().ln_1p()
        } else {
            1.0 - z + (z - 1.0).exp().ln_1p()
        }
    }

    fn first_derivative(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        if z < 1.0 {
            -1.0 / ((z - 1.0).exp() + 1.0)
        } else {
            let ez = (1.0 - z).exp();
            -ez / (ez + 1.0)
        }
    }

    fn second_derivative(&self, prediction: f64, label: f64) -> f64 {
        let z = prediction * label;
        // Symmetric in z - 1, so use the branch with a non-positive exponent
        let ez = (-(z - 1.0).abs()).exp();
        ez / ((ez + 1.0) * (ez + 1.0))
    }

    fn name(&self) -> &'static str {
        "LogLossMargin"
    }
}
