//! Left/right feature collection binding shared by all kernels

use crate::core::{FeatureSource, KernelError, Result};
use std::fmt;
use std::sync::Arc;

/// Bound pair of feature collections.
///
/// Fetching validates the indices and the equal-length requirement, so each
/// kernel only sees well-formed pairs.
#[derive(Clone, Default)]
pub struct FeatureBinding {
    sides: Option<(Arc<dyn FeatureSource>, Arc<dyn FeatureSource>)>,
    max_len: usize,
}

impl FeatureBinding {
    /// Bind two collections. Both must declare the same dimensionality.
    pub fn bind(left: Arc<dyn FeatureSource>, right: Arc<dyn FeatureSource>) -> Result<Self> {
        if left.dim() != right.dim() {
            return Err(KernelError::DimensionMismatch {
                expected: left.dim(),
                actual: right.dim(),
            });
        }

        let max_len = left.max_vector_len().max(right.max_vector_len());
        Ok(Self {
            sides: Some((left, right)),
            max_len,
        })
    }

    /// An empty binding
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.sides.is_some()
    }

    /// Longest vector length across both collections (n_max)
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of (left, right) vectors
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.sides
            .as_ref()
            .map(|(l, r)| (l.num_vectors(), r.num_vectors()))
    }

    /// True when left and right are the same collection
    pub fn is_symmetric(&self) -> bool {
        self.sides
            .as_ref()
            .is_some_and(|(l, r)| Arc::ptr_eq(l, r))
    }

    /// Fetch the vector pair (left[idx_a], right[idx_b])
    pub fn fetch(&self, idx_a: usize, idx_b: usize) -> Result<(&[f64], &[f64])> {
        let (left, right) = self.sides.as_ref().ok_or(KernelError::UnboundFeatures)?;

        let x = left
            .feature_vector(idx_a)
            .ok_or(KernelError::IndexOutOfRange {
                side: "left",
                index: idx_a,
                len: left.num_vectors(),
            })?;
        let z = right
            .feature_vector(idx_b)
            .ok_or(KernelError::IndexOutOfRange {
                side: "right",
                index: idx_b,
                len: right.num_vectors(),
            })?;

        check_lengths(x, z)?;
        Ok((x, z))
    }
}

impl fmt::Debug for FeatureBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureBinding")
            .field("shape", &self.shape())
            .field("max_len", &self.max_len)
            .field("symmetric", &self.is_symmetric())
            .finish()
    }
}

/// Equal-length check for a vector pair
pub fn check_lengths(x: &[f64], z: &[f64]) -> Result<()> {
    if x.len() != z.len() {
        return Err(KernelError::DimensionMismatch {
            expected: x.len(),
            actual: z.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DenseFeatures;

    fn collection(rows: Vec<Vec<f64>>) -> Arc<dyn FeatureSource> {
        Arc::new(DenseFeatures::new(rows))
    }

    #[test]
    fn test_unbound_fetch_fails() {
        let binding = FeatureBinding::unbound();
        assert!(!binding.is_bound());
        assert!(matches!(binding.fetch(0, 0), Err(KernelError::UnboundFeatures)));
    }

    #[test]
    fn test_bind_and_fetch() {
        let left = collection(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let right = collection(vec![vec![5.0, 6.0]]);
        let binding = FeatureBinding::bind(left, right).unwrap();

        assert_eq!(binding.shape(), Some((2, 1)));
        assert_eq!(binding.max_len(), 2);
        assert!(!binding.is_symmetric());

        let (x, z) = binding.fetch(1, 0).unwrap();
        assert_eq!(x, &[3.0, 4.0]);
        assert_eq!(z, &[5.0, 6.0]);
    }

    #[test]
    fn test_bind_rejects_incompatible_collections() {
        let left = collection(vec![vec![1.0, 2.0]]);
        let right = collection(vec![vec![1.0, 2.0, 3.0]]);
        assert!(matches!(
            FeatureBinding::bind(left, right),
            Err(KernelError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_fetch_out_of_range() {
        let features = collection(vec![vec![1.0]]);
        let binding = FeatureBinding::bind(features.clone(), features).unwrap();
        assert!(binding.is_symmetric());

        assert!(matches!(
            binding.fetch(3, 0),
            Err(KernelError::IndexOutOfRange {
                side: "left",
                index: 3,
                len: 1
            })
        ));
        assert!(matches!(
            binding.fetch(0, 1),
            Err(KernelError::IndexOutOfRange { side: "right", .. })
        ));
    }

    #[test]
    fn test_fetch_ragged_pair_is_dimension_mismatch() {
        let features = collection(vec![vec![1.0, 2.0, 3.0], vec![1.0]]);
        let binding = FeatureBinding::bind(features.clone(), features).unwrap();

        assert!(binding.fetch(0, 0).is_ok());
        assert!(matches!(
            binding.fetch(0, 1),
            Err(KernelError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }
}
