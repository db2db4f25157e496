//! Kernel functions

pub mod anova;
pub mod binding;
pub mod linear;
pub mod polynomial;
pub mod traits;

pub use self::anova::{AnovaKernel, BufferShape, PowerSumBuffers, SubsetSumTable};
pub use self::binding::FeatureBinding;
pub use self::linear::*;
pub use self::polynomial::*;
pub use self::traits::*;
