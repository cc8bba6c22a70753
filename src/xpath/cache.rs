//! Compiled Path Cache
//!
//! LRU cache from expression text to shared compiled pipelines, so hot
//! expressions are parsed once.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;

use super::compiler::{compile, CompiledPath};

/// Default number of compiled expressions kept
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Thread-safe LRU cache of compiled paths
#[derive(Debug)]
pub struct PathCache {
    inner: Mutex<LruCache<String, Arc<CompiledPath>>>,
}

impl PathCache {
    /// Create a cache holding up to `capacity` expressions (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        PathCache {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    // Entries are immutable once inserted, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<CompiledPath>>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached pipeline for `expression`, compiling it on a miss.
    ///
    /// Malformed expressions are cached too, as their deferred-error pipeline.
    pub fn get_or_compile(&self, expression: &str) -> Arc<CompiledPath> {
        let mut cache = self.lock();
        if let Some(hit) = cache.get(expression) {
            tracing::trace!(expression, "path cache hit");
            return Arc::clone(hit);
        }

        tracing::trace!(expression, "path cache miss");
        let compiled = Arc::new(compile(expression));
        cache.put(expression.to_string(), Arc::clone(&compiled));
        compiled
    }

    /// Whether `expression` is currently cached (does not touch recency)
    pub fn contains(&self, expression: &str) -> bool {
        self.lock().contains(expression)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Drop every cached pipeline
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_same_pipeline() {
        let cache = PathCache::new(4);
        let first = cache.get_or_compile("/bookstore/book");
        let second = cache.get_or_compile("/bookstore/book");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_eviction() {
        let cache = PathCache::new(2);
        cache.get_or_compile("a");
        cache.get_or_compile("b");
        cache.get_or_compile("a");
        cache.get_or_compile("c");
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = PathCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.get_or_compile("a");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_cached() {
        let cache = PathCache::default();
        let compiled = cache.get_or_compile("a[");
        assert!(compiled.error().is_some());
        assert!(cache.contains("a["));
    }

    #[test]
    fn test_clear() {
        let cache = PathCache::default();
        cache.get_or_compile("a");
        cache.clear();
        assert!(cache.is_empty());
    }
}
