//! ANOVA kernel evaluation
//!
//! The ANOVA kernel of degree d sums, over every strictly increasing index
//! tuple of size d, the product of the paired coordinates:
//!
//! K_d(x, z) = sum_{i_1 < ... < i_d} prod_j x_{i_j} * z_{i_j}
//!
//! The sum has C(n, d) terms and is evaluated in O(n * d) by either a
//! subset-sum table or Newton's identities over power sums.

pub mod api;
pub mod cache;
pub mod core;
pub mod data;
pub mod kernel;
pub mod loss;
pub mod matrix;
pub mod persistence;

// Re-export main types for convenience
pub use crate::api::KernelBuilder;
pub use crate::cache::{CacheStats, CachedKernel, KernelCache};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{KernelError, Result};
pub use crate::data::{CSVDataset, DenseFeatures, LibSVMDataset};
pub use crate::kernel::{AnovaKernel, Kernel, LinearKernel, PolynomialKernel};
pub use crate::loss::LossFunction;
pub use crate::matrix::{compute_kernel_matrix, KernelMatrix};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
