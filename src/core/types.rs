//! Core type definitions for kernel evaluation

use serde::{Deserialize, Serialize};

/// Kernel family tag reported to a dispatching framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KernelType {
    Linear,
    Polynomial,
    Anova,
}

/// Element type of the feature vectors a kernel consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    /// 64-bit floating point values
    Real,
}

/// Storage class of the feature vectors a kernel consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureClass {
    /// One contiguous slice per vector
    Dense,
}

/// Recurrence used to reduce the elementwise product vector to K_d
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationMethod {
    /// Bottom-up subset-sum table, A(k,j) = A(k-1,j) + t_k * A(k-1,j-1).
    /// No subtraction, so this is the numerically stable default.
    #[default]
    SubsetSum,
    /// Elementary symmetric polynomial from power sums via Newton's identities
    PowerSum,
}

impl std::fmt::Display for EvaluationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationMethod::SubsetSum => write!(f, "subset-sum"),
            EvaluationMethod::PowerSum => write!(f, "power-sum"),
        }
    }
}

/// Construction parameters for a kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Subset size d of the ANOVA sum (also the polynomial degree)
    pub degree: usize,
    /// Kernel cache size hint in bytes, consumed by the caching layer
    pub cache_size: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            degree: 1,
            cache_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Sparse vector representation with sorted indices
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    /// Sorted indices of non-zero elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted.
    /// Unpaired trailing indices or values are dropped.
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        debug_assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Expand into a dense vector of length `dim`.
    /// Entries at indices >= `dim` are dropped.
    pub fn to_dense(&self, dim: usize) -> Vec<f64> {
        let mut dense = vec![0.0; dim];
        for (&idx, &value) in self.indices.iter().zip(&self.values) {
            if idx < dim {
                dense[idx] = value;
            }
        }
        dense
    }

    /// Largest stored index plus one (0 for an empty vector)
    pub fn min_dim(&self) -> usize {
        self.indices.last().map_or(0, |&idx| idx + 1)
    }

    /// Number of non-zero elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
