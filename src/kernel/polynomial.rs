//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + r)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - r (coef0): independent term in the polynomial
//! - d (degree): degree of the polynomial
//!
//! Unlike the ANOVA kernel, which only sums products over distinct indices,
//! the expanded polynomial also contains repeated-index terms such as x_i^2 y_i^2.

use crate::core::{FeatureSource, KernelConfig, KernelError, KernelType, Result};
use crate::kernel::binding::FeatureBinding;
use crate::kernel::linear::dot_product;
use crate::kernel::Kernel;
use std::sync::Arc;

/// Polynomial kernel with configurable degree, gamma, and coefficient
#[derive(Debug, Clone)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product
    pub gamma: f64,
    /// Independent term in the polynomial
    pub coef0: f64,
    /// Degree of the polynomial
    pub degree: u32,
    cache_size: usize,
    binding: FeatureBinding,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial (must be > 0)
    /// * `gamma` - Scaling factor for the dot product (must be > 0)
    /// * `coef0` - Independent term in the polynomial
    ///
    /// # Examples
    /// ```
    /// use anova_kernel::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(2, 1.0, 1.0).unwrap();
    /// assert_eq!(quad_kernel.degree, 2);
    /// ```
    pub fn new(degree: u32, gamma: f64, coef0: f64) -> Result<Self> {
        if degree == 0 {
            return Err(KernelError::InvalidParameter(
                "Polynomial degree must be positive".to_string(),
            ));
        }
        if gamma.is_nan() || gamma <= 0.0 {
            return Err(KernelError::InvalidParameter(format!(
                "Gamma must be positive, got: {gamma}"
            )));
        }

        Ok(Self {
            gamma,
            coef0,
            degree,
            cache_size: KernelConfig::default().cache_size,
            binding: FeatureBinding::unbound(),
        })
    }

    /// Creates a quadratic kernel: (γ * <x,y> + 1)²
    pub fn quadratic(gamma: f64) -> Result<Self> {
        Self::new(2, gamma, 1.0)
    }

    /// Set the kernel cache size hint in bytes
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Evaluate on two slices of equal length
    pub fn evaluate(&self, x: &[f64], y: &[f64]) -> f64 {
        let kernel_value = self.gamma * dot_product(x, y) + self.coef0;

        // Negative bases are clamped to avoid sign flips for even degrees
        if kernel_value <= 0.0 {
            0.0
        } else {
            kernel_value.powi(self.degree as i32)
        }
    }
}

impl Kernel for PolynomialKernel {
    fn kernel_type(&self) -> KernelType {
        KernelType::Polynomial
    }

    fn name(&self) -> &'static str {
        "PolynomialKernel"
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
        Ok(self.evaluate(x, y))
    }
}
