//! Kernel matrix evaluation
//!
//! Rows are independent, so matrices are filled in parallel. A kernel may
//! hold mutable scratch space, so each rayon worker evaluates through its own
//! clone; clones share the bound feature collections.

use crate::core::{KernelError, Result};
use crate::kernel::Kernel;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Row-major matrix of kernel values K(left[i], right[j])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelMatrix {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl KernelMatrix {
    /// Assemble a matrix from equal-length rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            if row.len() != cols {
                return Err(KernelError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.values[i * self.cols + j])
        } else {
            None
        }
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.rows).then(|| &self.values[i * self.cols..(i + 1) * self.cols])
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}

/// Compute kernel values K(left[row_index], right[j]) for j >= start_col
pub fn compute_kernel_row<K: Kernel + ?Sized>(
    kernel: &mut K,
    row_index: usize,
    start_col: usize,
) -> Result<Vec<f64>> {
    let (_, cols) = kernel.shape().ok_or(KernelError::UnboundFeatures)?;
    (start_col..cols)
        .map(|j| kernel.compute(row_index, j))
        .collect()
}

/// Compute the full kernel matrix serially on one kernel instance
pub fn compute_kernel_matrix_serial<K: Kernel + ?Sized>(kernel: &mut K) -> Result<KernelMatrix> {
    let (rows, _) = kernel.shape().ok_or(KernelError::UnboundFeatures)?;
    let rows = (0..rows)
        .map(|i| compute_kernel_row(kernel, i, 0))
        .collect::<Result<Vec<_>>>()?;
    KernelMatrix::from_rows(rows)
}

/// Compute the full kernel matrix in parallel, one kernel clone per worker
pub fn compute_kernel_matrix<K: Kernel + Clone>(kernel: &K) -> Result<KernelMatrix> {
    let (rows, _) = kernel.shape().ok_or(KernelError::UnboundFeatures)?;
    let rows = (0..rows)
        .into_par_iter()
        .map_init(|| kernel.clone(), |worker, i| compute_kernel_row(worker, i, 0))
        .collect::<Result<Vec<_>>>()?;
    KernelMatrix::from_rows(rows)
}
