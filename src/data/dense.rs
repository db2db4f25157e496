//! In-memory dense feature collection

use crate::core::{FeatureSource, KernelError, Result, SparseVector};

/// Dense feature collection, one `Vec<f64>` per vector.
///
/// Rows may have different lengths; `dim()` reports the longest one. A kernel
/// evaluated on two rows of different length reports a dimension mismatch at
/// compute time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseFeatures {
    rows: Vec<Vec<f64>>,
    dim: usize,
}

impl DenseFeatures {
    /// Create a collection from rows without checking their lengths
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        let dim = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, dim }
    }

    /// Create a collection whose rows must all share one length
    pub fn uniform(rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some(row) = rows.iter().find(|r| r.len() != expected) {
                return Err(KernelError::DimensionMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }
        Ok(Self::new(rows))
    }

    /// Densify sparse vectors to a common dimension.
    ///
    /// `dim` of `None` uses the smallest dimension that holds every index.
    pub fn from_sparse(vectors: &[SparseVector], dim: Option<usize>) -> Self {
        let dim = dim.unwrap_or_else(|| vectors.iter().map(SparseVector::min_dim).max().unwrap_or(0));
        let rows = vectors.iter().map(|v| v.to_dense(dim)).collect();
        Self { rows, dim }
    }

    /// Borrow all rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the collection has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Vec<f64>>> for DenseFeatures {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::new(rows)
    }
}

impl FeatureSource for DenseFeatures {
    fn num_vectors(&self) -> usize {
        self.rows.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn feature_vector(&self, idx: usize) -> Option<&[f64]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    fn max_vector_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}
