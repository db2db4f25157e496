//! Linear kernel implementation

use crate::core::{FeatureSource, KernelConfig, KernelType, Result};
use crate::kernel::binding::FeatureBinding;
use crate::kernel::Kernel;
use std::sync::Arc;

/// Linear kernel: K(x, y) = x^T * y
///
/// Equal to the ANOVA kernel of degree 1.
#[derive(Debug, Clone)]
pub struct LinearKernel {
    cache_size: usize,
    binding: FeatureBinding,
}

impl LinearKernel {
    /// Create a new unbound linear kernel
    pub fn new(cache_size: usize) -> Self {
        Self {
            cache_size,
            binding: FeatureBinding::unbound(),
        }
    }
}

impl Default for LinearKernel {
    fn default() -> Self {
        Self::new(KernelConfig::default().cache_size)
    }
}

impl Kernel for LinearKernel {
    fn kernel_type(&self) -> KernelType {
        KernelType::Linear
    }

    fn name(&self) -> &'static str {
        "LinearKernel"
    }

    fn cache_size(&self) -> usize {
        self.cache_size
    }

    fn bind(&mut self, left: Arc<dyn FeatureSource>, right: Arc<dyn FeatureSource>) -> Result<()> {
        self.binding = FeatureBinding::bind(left, right)?;
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    fn shape(&self) -> Option<(usize, usize)> {
        self.binding.shape()
    }

    fn is_symmetric(&self) -> bool {
        self.binding.is_symmetric()
    }

    fn compute(&mut self, idx_a: usize, idx_b: usize) -> Result<f64> {
        let (x, y) = self.binding.fetch(idx_a, idx_b)?;
        Ok(dot_product(x, y))
    }
}

/// Dot product of two equal-length slices
pub fn dot_product(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KernelError;
    use crate::data::DenseFeatures;

    fn bound_kernel(rows: Vec<Vec<f64>>) -> LinearKernel {
        let features: Arc<dyn FeatureSource> = Arc::new(DenseFeatures::new(rows));
        let mut kernel = LinearKernel::default();
        kernel.bind(features.clone(), features).unwrap();
        kernel
    }

    #[test]
    fn test_linear_kernel_basic() {
        let mut kernel = bound_kernel(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, 2.0]]);

        // Only index 2 overlaps: 2.0 * 2.0 = 4.0
        assert_eq!(kernel.compute(0, 1).unwrap(), 4.0);
        assert!(kernel.is_symmetric());
        assert_eq!(kernel.shape(), Some((2, 2)));
    }

    #[test]
    fn test_linear_kernel_identical() {
        let mut kernel = bound_kernel(vec![vec![1.0, 2.0, 3.0]]);

        // x^T * x = 1^2 + 2^2 + 3^2 = 14
        assert_eq!(kernel.compute(0, 0).unwrap(), 14.0);
    }

    #[test]
    fn test_linear_kernel_unbound() {
        let mut kernel = LinearKernel::new(0);
        assert!(matches!(
            kernel.compute(0, 0),
            Err(KernelError::UnboundFeatures)
        ));
        assert_eq!(kernel.kernel_type(), KernelType::Linear);
    }

    #[test]
    fn test_dot_product() {
        assert_eq!(dot_product(&[1.0, 3.0, 2.0], &[2.0, 1.0, 4.0]), 13.0);
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    #[test]
    fn test_linear_kernel_ragged_pair_rejected() {
        let mut kernel = bound_kernel(vec![vec![1.0, 2.0], vec![1.0]]);
        assert!(matches!(
            kernel.compute(0, 1),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }
}
