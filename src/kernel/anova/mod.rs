//! ANOVA kernel
//!
//! K_d(x, z) = sum over 1 <= i_1 < ... < i_d <= n of prod_j x_{i_j} * z_{i_j}
//!
//! The sum has C(n, d) terms. It equals the elementary symmetric polynomial
//! e_d of the elementwise product t_k = x_k * z_k, which is evaluated with one
//! of two O(n*d) recurrences:
//!
//! - [`SubsetSumTable`]: additive dynamic programming table (default)
//! - [`PowerSumBuffers`]: Newton's identities over power sums
//!
//! Both must agree within floating-point tolerance; [`AnovaKernel::compute_checked`]
//! evaluates both and reports a divergence.
//!
//! Edge cases are handled before either recurrence runs: d = 0 gives 1
//! (including n = 0) and d > n gives 0.
//!
//! Scratch buffers belong to one instance and are overwritten on every call.
//! For parallel evaluation clone the kernel per worker: clones share the
//! feature collections and own independent buffers.

pub mod power_sum;
pub mod subset_sum;

pub use self::power_sum::PowerSumBuffers;
pub use self::subset_sum::SubsetSumTable;

use crate::core::{EvaluationMethod, FeatureSource, KernelConfig, KernelError, KernelType, Result};
use crate::kernel::binding::{check_lengths, FeatureBinding};
use crate::kernel::Kernel;
use log::debug;
use std::sync::Arc;

/// Write t_k = x_k * z_k into `out`, reusing its allocation
pub fn elementwise_product(x: &[f64], z: &[f64], out: &mut Vec<f64>) {
    out.clear();
    out.extend(x.iter().zip(z).map(|(&a, &b)| a * b));
}

/// |a - b| <= tolerance * max(1, |a|, |b|)
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}

/// Convert a signed degree, rejecting negative values
fn validate_degree(degree: i32) -> Result<usize> {
    usize::try_from(degree).map_err(|_| {
        KernelError::InvalidParameter(format!("Degree must be non-negative, got: {degree}"))
    })
}

/// Scratch space for one evaluation at a time
#[derive(Debug, Clone, Default)]
struct Scratch {
    table: SubsetSumTable,
    power: PowerSumBuffers,
    product: Vec<f64>,
}

impl Scratch {
    fn resize(&mut self, degree: usize, max_len: usize) {
        self.table.resize(degree, max_len);
        self.power.resize(degree, max_len);
        self.product = Vec::with_capacity(max_len);
    }

    fn evaluate(
        &mut self,
        degree: usize,
        method: EvaluationMethod,
        x: &[f64],
        z: &[f64],
    ) -> Result<f64> {
        check_lengths(x, z)?;
        let n = x.len();
        if degree == 0 {
            return Ok(1.0);
        }
        if degree > n {
            return Ok(0.0);
        }

        elementwise_product(x, z, &mut self.product);
        let t = &self.product;
        Ok(match method {
            EvaluationMethod::SubsetSum => self.table.evaluate(t, degree),
            EvaluationMethod::PowerSum => self.power.evaluate(t, degree),
        })
    }

    fn cross_check(&mut self, degree: usize, x: &[f64], z: &[f64], tolerance: f64) -> Result<f64> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(KernelError::InvalidParameter(format!(
                "Tolerance must be finite and non-negative, got: {tolerance}"
            )));
        }

        let subset_sum = self.evaluate(degree, EvaluationMethod::SubsetSum, x, z)?;
        let power_sum = self.evaluate(degree, EvaluationMethod::PowerSum, x, z)?;

        if within_tolerance(subset_sum, power_sum, tolerance) {
            Ok(subset_sum)
        } else {
            Err(KernelError::MethodDivergence {
                subset_sum,
                power_sum,
                tolerance,
            })
        }
    }
}

/// Buffer dimensions currently allocated by an [`AnovaKernel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferShape {
    /// Subset-sum table as (degree rows, prefix columns)
    pub table: (usize, usize),
    /// Elementary symmetric values e[0..=d]
    pub elementary: usize,
    /// Power sums p[0..=d]
    pub power_sums: usize,
    /// Running powers, one per coordinate
    pub running: usize,
}

/// Degree-parameterized ANOVA kernel
#[derive(Debug, Clone)]
pub struct AnovaKernel {
    degree: usize,
    cache_size: usize,
    binding: FeatureBinding,
    scratch: Scratch,
}

impl AnovaKernel {
    /// Create an unbound kernel
    ///
    /// # Arguments
    /// * `degree` - Subset size d (must be >= 0)
    /// * `cache_size` - Kernel cache size hint in bytes
    ///
    /// # Examples
    /// ```
    /// use anova_kernel::kernel::AnovaKernel;
    ///
    /// let mut kernel = AnovaKernel::new(2, 1024).unwrap();
    /// let value = kernel.compute_vectors(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]).unwrap();
    /// assert_eq!(value, 11.0);
    /// ```
    pub fn new(degree: i32, cache_size: usize) -> Result<Self> {
        let degree = validate_degree(degree)?;
        Ok(Self::from_config(&KernelConfig { degree, cache_size }))
    }

    /// Create a kernel bound to left and right feature collections
    pub fn with_features(
        left: Arc<dyn FeatureSource>,
        right: Arc<dyn FeatureSource>,
        degree: i32,
        cache_size: usize,
    ) -> Result<Self> {
        let mut kernel = Self::new(degree, cache_size)?;
        kernel.bind(left, right)?;
        Ok(kernel)
    }

    /// Create an unbound kernel from a configuration
    pub fn from_config(config: &KernelConfig) -> Self {
        let mut kernel = Self {
            degree: config.degree,
            cache_size: config.cache_size,
            binding: FeatureBinding::unbound(),
            scratch: Scratch::default(),
        };
        kernel.resize_buffers();
        kernel
    }

    /// Current configuration
    pub fn config(&self) -> KernelConfig {
        KernelConfig {
            degree: self.degree,
            cache_size: self.cache_size,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Change the degree and resize all scratch buffers
    pub fn set_degree(&mut self, degree: i32) -> Result<()> {
        self.degree = validate_degree(degree)?;
        self.resize_buffers();
        Ok(())
    }

    /// Bind feature collections and size buffers to the longest vector
    pub fn bind(&mut self, left: Arc<dyn FeatureSource>, right: Arc<dyn FeatureSource>) -> Result<()> {
        self.binding = FeatureBinding::bind(left, right)?;
        self.resize_buffers();
        Ok(())
    }

    /// Currently allocated scratch dimensions
    pub fn buffer_shape(&self) -> BufferShape {
        let (elementary, power_sums, running) = self.scratch.power.lens();
        BufferShape {
            table: self.scratch.table.dims(),
            elementary,
            power_sums,
            running,
        }
    }

    fn resize_buffers(&mut self) {
        let max_len = self.binding.max_len();
        self.scratch.resize(self.degree, max_len);
        debug!(
            "ANOVA buffers sized for degree {} and n_max {}: table {}x{}",
            self.degree,
            max_len,
            self.degree + 1,
            max_len + 1
        );
    }

    /// Compute K_d(left[idx_a], right[idx_b]) with the subset-sum recurrence
    pub fn compute_kernel(&mut self, idx_a: usize, idx_b: usize) -> Result<f64> {
        self.compute_with(EvaluationMethod::SubsetSum, idx_a, idx_b)
    }

    /// Force the subset-sum table recurrence
    pub fn compute_via_method1(&mut self, idx_a: usize, idx_b: usize) -> Result<f64> {
        self.compute_with(EvaluationMethod::SubsetSum, idx_a, idx_b)
    }

    /// Force the Newton-identity power-sum recurrence
    pub fn compute_via_method2(&mut self, idx_a: usize, idx_b: usize) -> Result<f64> {
        self.compute_with(EvaluationMethod::PowerSum, idx_a, idx_b)
    }

    /// Compute K_d for a bound index pair with the given method
    pub fn compute_with(
        &mut self,
        method: EvaluationMethod,
        idx_a: usize,
        idx_b: usize,
    ) -> Result<f64> {
        let (x, z) = self.binding.fetch(idx_a, idx_b)?;
        self.scratch.evaluate(self.degree, method, x, z)
    }

    /// Compute with both methods and fail if they diverge
    pub fn compute_checked(&mut self, idx_a: usize, idx_b: usize, tolerance: f64) -> Result<f64> {
        let (x, z) = self.binding.fetch(idx_a, idx_b)?;
        self.scratch.cross_check(self.degree, x, z, tolerance)
    }

    /// Compute K_d(x, z) directly on slices with the subset-sum recurrence
    pub fn compute_vectors(&mut self, x: &[f64], z: &[f64]) -> Result<f64> {
        self.compute_vectors_with(EvaluationMethod::SubsetSum, x, z)
    }

    /// Compute K_d(x, z) directly on slices with the given method
    pub fn compute_vectors_with(
        &mut self,
        method: EvaluationMethod,
        x: &[f64],
        z: &[f64],
    ) -> Result<f64> {
        self.scratch.evaluate(self.degree, method, x, z)
    }

    /// Slice version of [`AnovaKernel::compute_checked`]
    pub fn cross_check_vectors(&mut self, x: &[f64], z: &[f64], tolerance: f64) -> Result<f64> {
        self.scratch.cross_check(self.degree, x, z, tolerance)
    }
}

impl Default for AnovaKernel {
    /// Unbound kernel of degree 1
    fn default() -> Self {
        Self::from_config(&KernelConfig::default())
    }
}

impl Kernel for AnovaKernel {
    fn kernel_type(&self) -> KernelType {
        KernelType::Anova
    }

    fn name(&self) -> &'static str {
        "ANOVAKernel"
    }

    fn cache_size(&self) -> usize {
        self.cache_size
    }

    fn bind(&mut self, left: Arc<dyn FeatureSource>, right: Arc<dyn FeatureSource>) -> Result<()> {
        AnovaKernel::bind(self, left, right)
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
        self.compute_kernel(idx_a, idx_b)
    }
}
