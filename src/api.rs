//! High-level API for kernel evaluation
//!
//! # Quick Start
//!
//! ```rust
//! use anova_kernel::api::{quick, KernelBuilder};
//! use anova_kernel::DenseFeatures;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // One-shot evaluation on slices
//! assert_eq!(quick::anova(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0], 2)?, 11.0);
//!
//! // Bound kernel over a feature collection
//! let features = DenseFeatures::new(vec![vec![1.0, 2.0, 3.0], vec![1.0, 1.0, 1.0]]);
//! let mut kernel = KernelBuilder::new()
//!     .with_degree(2)
//!     .with_symmetric_features(features)
//!     .build()?;
//! assert_eq!(kernel.compute_kernel(0, 1)?, 11.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{FeatureSource, KernelConfig, Result};
use crate::kernel::AnovaKernel;
use std::sync::Arc;

/// Builder for [`AnovaKernel`]
pub struct KernelBuilder {
    degree: i32,
    cache_size: usize,
    features: Option<(Arc<dyn FeatureSource>, Arc<dyn FeatureSource>)>,
}

impl KernelBuilder {
    /// Start from the default configuration (degree 1)
    pub fn new() -> Self {
        let config = KernelConfig::default();
        Self {
            degree: config.degree as i32,
            cache_size: config.cache_size,
            features: None,
        }
    }

    /// Set the subset size d; negative values fail in `build`
    pub fn with_degree(mut self, degree: i32) -> Self {
        self.degree = degree;
        self
    }

    /// Set kernel cache size hint in bytes
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Bind separate left and right collections
    pub fn with_features<L, R>(mut self, left: L, right: R) -> Self
    where
        L: FeatureSource + 'static,
        R: FeatureSource + 'static,
    {
        let left: Arc<dyn FeatureSource> = Arc::new(left);
        let right: Arc<dyn FeatureSource> = Arc::new(right);
        self.features = Some((left, right));
        self
    }

    /// Bind one collection on both sides
    pub fn with_symmetric_features<F: FeatureSource + 'static>(mut self, features: F) -> Self {
        let shared: Arc<dyn FeatureSource> = Arc::new(features);
        self.features = Some((shared.clone(), shared));
        self
    }

    /// Bind already shared collections
    pub fn with_shared_features(
        mut self,
        left: Arc<dyn FeatureSource>,
        right: Arc<dyn FeatureSource>,
    ) -> Self {
        self.features = Some((left, right));
        self
    }

    /// Validate the configuration and create the kernel
    pub fn build(self) -> Result<AnovaKernel> {
        match self.features {
            Some((left, right)) => AnovaKernel::with_features(left, right, self.degree, self.cache_size),
            None => AnovaKernel::new(self.degree, self.cache_size),
        }
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience functions for one-shot evaluation
///
/// Each call allocates its own scratch space, so these are safe to call from
/// any number of threads at once.
pub mod quick {
    use super::*;
    use crate::core::EvaluationMethod;

    /// K_d(x, z) with the subset-sum recurrence
    pub fn anova(x: &[f64], z: &[f64], degree: i32) -> Result<f64> {
        AnovaKernel::new(degree, 0)?.compute_vectors(x, z)
    }

    /// K_d(x, z) with the given recurrence
    pub fn anova_with(method: EvaluationMethod, x: &[f64], z: &[f64], degree: i32) -> Result<f64> {
        AnovaKernel::new(degree, 0)?.compute_vectors_with(method, x, z)
    }

    /// K_d(x, z) computed both ways; fails if the results diverge
    pub fn anova_checked(x: &[f64], z: &[f64], degree: i32, tolerance: f64) -> Result<f64> {
        AnovaKernel::new(degree, 0)?.cross_check_vectors(x, z, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EvaluationMethod, KernelError};
    use crate::data::DenseFeatures;
    use crate::kernel::Kernel;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults() {
        let kernel = KernelBuilder::new().build().unwrap();
        assert_eq!(kernel.config(), KernelConfig::default());
        assert!(!kernel.is_bound());
    }

    #[test]
    fn test_builder_pattern() {
        let kernel = KernelBuilder::new()
            .with_degree(3)
            .with_cache_size(2048)
            .build()
            .unwrap();

        assert_eq!(kernel.degree(), 3);
        assert_eq!(kernel.cache_size(), 2048);
    }

    #[test]
    fn test_builder_rejects_negative_degree() {
        let result = KernelBuilder::new().with_degree(-2).build();
        assert!(matches!(result, Err(KernelError::InvalidParameter(_))));
    }

    #[test]
    fn test_builder_binds_features() {
        let left = DenseFeatures::new(vec![vec![1.0, 2.0]]);
        let right = DenseFeatures::new(vec![vec![3.0, 4.0], vec![1.0, 1.0]]);
        let mut kernel = KernelBuilder::new()
            .with_degree(2)
            .with_features(left, right)
            .build()
            .unwrap();

        assert_eq!(kernel.shape(), Some((1, 2)));
        assert!(!kernel.is_symmetric());
        // t = [3, 8]
        assert_eq!(kernel.compute_kernel(0, 0).unwrap(), 24.0);
    }

    #[test]
    fn test_builder_rejects_incompatible_features() {
        let result = KernelBuilder::new()
            .with_features(
                DenseFeatures::new(vec![vec![1.0]]),
                DenseFeatures::new(vec![vec![1.0, 2.0]]),
            )
            .build();
        assert!(matches!(result, Err(KernelError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_quick_functions() {
        let x = [1.0, 2.0, 3.0];
        let z = [1.0, 1.0, 1.0];

        assert_eq!(quick::anova(&x, &z, 2).unwrap(), 11.0);
        assert_eq!(quick::anova(&x, &z, 1).unwrap(), 6.0);
        assert_eq!(quick::anova(&x, &z, 0).unwrap(), 1.0);
        assert_eq!(quick::anova(&x[..2], &z[..2], 3).unwrap(), 0.0);
        assert_relative_eq!(
            quick::anova_with(EvaluationMethod::PowerSum, &x, &z, 2).unwrap(),
            11.0,
            epsilon = 1e-12
        );
        assert_eq!(quick::anova_checked(&x, &z, 3, 1e-9).unwrap(), 6.0);
        assert!(quick::anova(&x, &z, -1).is_err());
    }
}
