//! Core traits for kernel evaluation

/// Feature collection abstraction: the accessor a kernel fetches vectors through
pub trait FeatureSource: Send + Sync {
    /// Number of vectors in the collection
    fn num_vectors(&self) -> usize;

    /// Declared dimensionality of the collection
    fn dim(&self) -> usize;

    /// Borrow the vector at `idx`, or `None` when out of range
    fn feature_vector(&self, idx: usize) -> Option<&[f64]>;

    /// Length of the longest vector in the collection
    fn max_vector_len(&self) -> usize {
        (0..self.num_vectors())
            .filter_map(|i| self.feature_vector(i))
            .map(<[f64]>::len)
            .max()
            .unwrap_or(0)
    }

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.num_vectors() == 0
    }
}
