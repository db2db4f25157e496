//! Kernel matrix reports
//!
//! A computed kernel matrix is saved together with the kernel that produced
//! it, so results from the CLI can be reloaded and compared later.

use crate::core::{EvaluationMethod, KernelError, KernelType, Result};
use crate::kernel::Kernel;
use crate::matrix::KernelMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable kernel matrix with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixReport {
    /// Kernel that produced the matrix
    pub kernel: KernelDescriptor,
    /// Kernel values
    pub matrix: KernelMatrix,
    /// Report metadata
    pub metadata: ReportMetadata,
}

/// Kernel identification and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelDescriptor {
    pub name: String,
    pub kernel_type: KernelType,
    /// ANOVA subset size or polynomial degree, when the kernel has one
    pub degree: Option<usize>,
    /// Recurrence used for ANOVA values
    pub method: Option<EvaluationMethod>,
}

impl KernelDescriptor {
    /// Describe a kernel by its tags
    pub fn of<K: Kernel + ?Sized>(kernel: &K) -> Self {
        Self {
            name: kernel.name().to_string(),
            kernel_type: kernel.kernel_type(),
            degree: None,
            method: None,
        }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }

    pub fn with_method(mut self, method: EvaluationMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// Report metadata for tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Library version used to create the report
    pub library_version: String,
    /// Creation timestamp
    pub created_at: String,
}

impl MatrixReport {
    /// Create a report stamped with the current time
    pub fn new(kernel: KernelDescriptor, matrix: KernelMatrix) -> Self {
        Self {
            kernel,
            matrix,
            metadata: ReportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save report to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(KernelError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| KernelError::SerializationError(format!("Failed to write report: {e}")))
    }

    /// Load report from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let reader = BufReader::new(file);
        let report: Self = serde_json::from_reader(reader)
            .map_err(|e| KernelError::SerializationError(format!("Failed to read report: {e}")))?;

        if report.matrix.values.len() != report.matrix.rows * report.matrix.cols {
            return Err(KernelError::DimensionMismatch {
                expected: report.matrix.rows * report.matrix.cols,
                actual: report.matrix.values.len(),
            });
        }
        Ok(report)
    }
}
