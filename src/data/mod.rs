//! Feature collections and data loaders
//!
//! Loaders read LibSVM and CSV files and produce `DenseFeatures`, the
//! in-memory collection kernels bind to.

pub mod csv;
pub mod dense;
pub mod libsvm;

pub use self::csv::*;
pub use self::dense::*;
pub use self::libsvm::*;
