//! Kernel cache implementation
//!
//! LRU cache for kernel values keyed by (left index, right index). When the
//! kernel is bound to the same collection on both sides the matrix is
//! symmetric and K(i,j) and K(j,i) share one entry.

use crate::core::Result;
use crate::kernel::Kernel;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Bytes accounted per cache entry (key + value + overhead)
const BYTES_PER_ENTRY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    i: usize,
    j: usize,
}

impl CacheKey {
    fn new(i: usize, j: usize, symmetric: bool) -> Self {
        if symmetric && i > j {
            Self { i: j, j: i }
        } else {
            Self { i, j }
        }
    }
}

/// LRU cache for kernel matrix values
pub struct KernelCache {
    cache: LruCache<CacheKey, f64>,
    symmetric: bool,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Create a new kernel cache with specified capacity in number of entries
    pub fn new(capacity: usize, symmetric: bool) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            symmetric,
            hits: 0,
            misses: 0,
        }
    }

    /// Create a kernel cache with capacity based on memory size in bytes
    pub fn with_memory_limit(memory_bytes: usize, symmetric: bool) -> Self {
        Self::new((memory_bytes / BYTES_PER_ENTRY).max(1), symmetric)
    }

    /// Get a kernel value from cache
    pub fn get(&mut self, i: usize, j: usize) -> Option<f64> {
        let key = CacheKey::new(i, j, self.symmetric);
        if let Some(&value) = self.cache.get(&key) {
            self.hits += 1;
            Some(value)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Put a kernel value into cache
    pub fn put(&mut self, i: usize, j: usize, value: f64) {
        let key = CacheKey::new(i, j, self.symmetric);
        self.cache.put(key, value);
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.cache.cap().get(),
            size: self.cache.len(),
        }
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}

/// Kernel wrapper that memoizes computed values
pub struct CachedKernel<K: Kernel> {
    kernel: K,
    cache: KernelCache,
    /// Set by `kernel_mut`; the cache is rebuilt from the kernel on the next `get`
    stale: bool,
}

impl<K: Kernel> CachedKernel<K> {
    /// Wrap a bound kernel, sizing the cache from its cache size hint
    pub fn new(kernel: K) -> Self {
        let cache = Self::cache_for(&kernel);
        Self {
            kernel,
            cache,
            stale: false,
        }
    }

    fn cache_for(kernel: &K) -> KernelCache {
        KernelCache::with_memory_limit(kernel.cache_size(), kernel.is_symmetric())
    }

    /// Kernel value for (idx_a, idx_b), computed on a cache miss
    pub fn get(&mut self, idx_a: usize, idx_b: usize) -> Result<f64> {
        if self.stale {
            // Bindings may have changed, and with them key symmetry
            self.cache = Self::cache_for(&self.kernel);
            self.stale = false;
        }
        if let Some(value) = self.cache.get(idx_a, idx_b) {
            return Ok(value);
        }
        let value = self.kernel.compute(idx_a, idx_b)?;
        self.cache.put(idx_a, idx_b, value);
        Ok(value)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Mutable access to the kernel; invalidates every cached value since
    /// parameters or bindings may change
    pub fn kernel_mut(&mut self) -> &mut K {
        self.cache.clear();
        self.stale = true;
        &mut self.kernel
    }

    pub fn into_inner(self) -> K {
        self.kernel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FeatureSource;
    use crate::data::DenseFeatures;
    use crate::kernel::{AnovaKernel, LinearKernel};
    use std::sync::Arc;

    #[test]
    fn test_cache_key_normalization() {
        assert_eq!(CacheKey::new(1, 5, true), CacheKey::new(5, 1, true));
        assert_ne!(CacheKey::new(1, 5, false), CacheKey::new(5, 1, false));
    }

    #[test]
    fn test_kernel_cache_basic() {
        let mut cache = KernelCache::new(3, true);

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().misses, 1);

        cache.put(0, 1, 5.0);
        assert_eq!(cache.get(0, 1), Some(5.0));
        assert_eq!(cache.stats().hits, 1);

        // Symmetric access
        assert_eq!(cache.get(1, 0), Some(5.0));
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn test_asymmetric_cache_keeps_orientation() {
        let mut cache = KernelCache::new(4, false);
        cache.put(0, 1, 5.0);
        assert_eq!(cache.get(1, 0), None);
        assert_eq!(cache.get(0, 1), Some(5.0));
    }

    #[test]
    fn test_kernel_cache_lru_eviction() {
        let mut cache = KernelCache::new(2, true);

        cache.put(0, 1, 1.0);
        cache.put(1, 2, 2.0);
        cache.put(2, 3, 3.0); // Should evict (0,1)

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.get(1, 2), Some(2.0));
        assert_eq!(cache.get(2, 3), Some(3.0));
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = KernelCache::new(10, true);
        assert_eq!(cache.hit_rate(), 0.0);

        cache.get(0, 1);
        cache.get(1, 2);
        cache.put(0, 1, 1.0);
        cache.get(0, 1);
        cache.get(0, 1);

        // 2 hits, 2 misses = 50%
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_cache_with_memory_limit() {
        let cache = KernelCache::with_memory_limit(1000, true);
        assert_eq!(cache.stats().capacity, 1000 / BYTES_PER_ENTRY);

        let tiny = KernelCache::with_memory_limit(0, true);
        assert_eq!(tiny.stats().capacity, 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = KernelCache::new(10, true);
        cache.put(0, 1, 1.0);
        cache.get(0, 1);

        cache.clear();

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_cached_kernel() {
        let features: Arc<dyn FeatureSource> = Arc::new(DenseFeatures::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![1.0, 1.0, 1.0],
        ]));
        let kernel = AnovaKernel::with_features(features.clone(), features, 2, 4096).unwrap();
        let mut cached = CachedKernel::new(kernel);

        assert_eq!(cached.get(0, 1).unwrap(), 11.0);
        assert_eq!(cached.get(1, 0).unwrap(), 11.0);
        assert_eq!(cached.stats().hits, 1);
        assert_eq!(cached.stats().capacity, 4096 / BYTES_PER_ENTRY);

        cached.kernel_mut().set_degree(1).unwrap();
        assert_eq!(cached.get(0, 1).unwrap(), 6.0);
        assert_eq!(cached.kernel().degree(), 1);
    }

    #[test]
    fn test_cached_kernel_asymmetric_binding() {
        let left: Arc<dyn FeatureSource> = Arc::new(DenseFeatures::new(vec![vec![1.0], vec![2.0]]));
        let right: Arc<dyn FeatureSource> =
            Arc::new(DenseFeatures::new(vec![vec![10.0], vec![100.0]]));
        let mut kernel = LinearKernel::new(1024);
        kernel.bind(left, right).unwrap();
        let mut cached = CachedKernel::new(kernel);

        assert_eq!(cached.get(0, 1).unwrap(), 100.0);
        assert_eq!(cached.get(1, 0).unwrap(), 20.0);
        assert_eq!(cached.stats().hits, 0);
        assert_eq!(cached.get(1, 0).unwrap(), 20.0);
        assert_eq!(cached.stats().hits, 1);
    }

    #[test]
    fn test_cached_kernel_rebind_to_distinct_collections() {
        let shared: Arc<dyn FeatureSource> = Arc::new(DenseFeatures::new(vec![vec![1.0], vec![2.0]]));
        let mut kernel = LinearKernel::new(1024);
        kernel.bind(shared.clone(), shared).unwrap();
        let mut cached = CachedKernel::new(kernel);
        assert_eq!(cached.get(0, 1).unwrap(), 2.0);

        let left: Arc<dyn FeatureSource> = Arc::new(DenseFeatures::new(vec![vec![1.0], vec![2.0]]));
        let right: Arc<dyn FeatureSource> =
            Arc::new(DenseFeatures::new(vec![vec![10.0], vec![100.0]]));
        cached.kernel_mut().bind(left.clone(), right.clone()).unwrap();

        assert_eq!(cached.get(0, 1).unwrap(), 100.0);
        assert_eq!(cached.get(1, 0).unwrap(), 20.0);

        // And back to one shared collection: mirrored pairs share an entry again
        cached.kernel_mut().bind(right.clone(), right).unwrap();
        assert_eq!(cached.get(0, 1).unwrap(), 1000.0);
        assert_eq!(cached.get(1, 0).unwrap(), 1000.0);
        assert_eq!(cached.stats().hits, 1);
    }

    #[test]
    fn test_cached_kernel_propagates_errors() {
        let mut cached = CachedKernel::new(AnovaKernel::default());
        assert!(cached.get(0, 0).is_err());
        assert_eq!(cached.stats().size, 0);
    }
}
