//! Error types for kernel evaluation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Kernel has no bound features; call bind() first")]
    UnboundFeatures,

    #[error("Index out of range on {side} features: {index} >= {len}")]
    IndexOutOfRange {
        side: &'static str,
        index: usize,
        len: usize,
    },

    #[error(
        "Subset-sum and power-sum results diverge: {subset_sum} vs {power_sum} (tolerance {tolerance})"
    )]
    MethodDivergence {
        subset_sum: f64,
        power_sum: f64,
        tolerance: f64,
    },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;
