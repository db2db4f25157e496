//! Kernel trait definition

use crate::core::{FeatureClass, FeatureSource, FeatureType, KernelType, Result};
use std::sync::Arc;

/// Kernel capability interface
///
/// A kernel is bound to a left and a right feature collection and evaluates
/// K(left[a], right[b]) for index pairs. Implementations may keep mutable
/// scratch space, so `compute` takes `&mut self`; evaluate a matrix in
/// parallel by giving each worker its own clone.
pub trait Kernel: Send + Sync {
    /// Kernel family tag
    fn kernel_type(&self) -> KernelType;

    /// Element type of the consumed features
    fn feature_type(&self) -> FeatureType {
        FeatureType::Real
    }

    /// Storage class of the consumed features
    fn feature_class(&self) -> FeatureClass {
        FeatureClass::Dense
    }

    /// Human-readable kernel name
    fn name(&self) -> &'static str;

    /// Cache size hint in bytes for the kernel-value cache
    fn cache_size(&self) -> usize;

    /// Bind left and right feature collections
    fn bind(&mut self, left: Arc<dyn FeatureSource>, right: Arc<dyn FeatureSource>) -> Result<()>;

    /// Whether `bind` has succeeded
    fn is_bound(&self) -> bool;

    /// Number of (left, right) vectors in the bound collections
    fn shape(&self) -> Option<(usize, usize)>;

    /// Whether left and right are the same collection, so K(i,j) = K(j,i)
    fn is_symmetric(&self) -> bool;

    /// Compute K(left[idx_a], right[idx_b])
    fn compute(&mut self, idx_a: usize, idx_b: usize) -> Result<f64>;
}
