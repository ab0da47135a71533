//! Bounded evaluation cache for objectives.
//!
//! This module provides a caching wrapper that memoizes `(value, gradient)`
//! pairs keyed on the exact input vector. The line search and the iteration
//! driver re-evaluate the same point several times per iteration (start of
//! the search, accepted trial, start of the next iteration); with a small
//! cache those repeats cost nothing.
//!
//! Keys are compared bit-for-bit. There is no tolerance: two points that
//! differ in the last ulp are different entries, and `0.0` and `-0.0` are
//! distinct keys.

use crate::{
    objective::gradient_fn::GradientFn,
    types::{DVector, Scalar},
};
use lru::LruCache;
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::num::NonZeroUsize;

/// Exact bit pattern of a point, widened to f64.
///
/// The f32 -> f64 widening is exact, so distinct f32 inputs map to distinct keys.
type PointKey = Vec<u64>;

fn point_key<T: Scalar>(point: &DVector<T>) -> PointKey {
    point.iter().map(|&x| Scalar::to_f64(x).to_bits()).collect()
}

/// A cached evaluation.
#[derive(Debug, Clone)]
struct CacheEntry<T: Scalar> {
    value: T,
    gradient: DVector<T>,
}

/// Internal cache storage
struct CacheStorage<T: Scalar> {
    /// `None` when caching is disabled (capacity 0)
    entries: Option<LruCache<PointKey, CacheEntry<T>>>,
    hits: usize,
    misses: usize,
}

/// A caching wrapper that keeps the `max_to_cache` most recently inserted
/// evaluations of an objective.
///
/// Lookups never refresh an entry, so eviction always drops the oldest
/// insertion. A capacity of zero disables caching: every call is forwarded
/// and nothing is retained.
///
/// # Example
///
/// ```rust
/// use newtonopt_core::objective::{CachingGradientFn, GradientFn, QuadraticCost};
/// use nalgebra::DVector;
///
/// let cached = CachingGradientFn::new(4, QuadraticCost::<f64>::simple(3));
/// let point = DVector::from_vec(vec![1.0, 2.0, 3.0]);
///
/// // First call computes the value
/// let (value1, _) = cached.eval_at(&point);
///
/// // Second call with the same point returns the cached value
/// let (value2, _) = cached.eval_at(&point);
/// assert_eq!(value1, value2);
/// assert_eq!(cached.cache_stats(), (1, 1));
/// ```
pub struct CachingGradientFn<T: Scalar, G> {
    /// The underlying objective
    inner: G,
    max_to_cache: usize,
    /// Cache storage wrapped in RefCell for interior mutability
    cache: RefCell<CacheStorage<T>>,
}

impl<T, G> CachingGradientFn<T, G>
where
    T: Scalar,
    G: GradientFn<T>,
{
    /// Creates a cache holding at most `max_to_cache` evaluations of `inner`.
    pub fn new(max_to_cache: usize, inner: G) -> Self {
        Self {
            inner,
            max_to_cache,
            cache: RefCell::new(CacheStorage {
                entries: NonZeroUsize::new(max_to_cache).map(LruCache::new),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Returns the underlying objective.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.max_to_cache
    }

    /// Number of evaluations currently retained.
    pub fn len(&self) -> usize {
        self.cache
            .borrow()
            .entries
            .as_ref()
            .map_or(0, |entries| entries.len())
    }

    /// Returns true if no evaluation is retained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics as (hits, misses).
    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.borrow();
        (cache.hits, cache.misses)
    }

    /// Drops every retained evaluation. Statistics are kept.
    pub fn clear(&self) {
        if let Some(entries) = self.cache.borrow_mut().entries.as_mut() {
            entries.clear();
        }
    }
}

impl<T, G> GradientFn<T> for CachingGradientFn<T, G>
where
    T: Scalar,
    G: GradientFn<T>,
{
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>) {
        let key = point_key(point);

        {
            let mut cache = self.cache.borrow_mut();
            let hit = cache
                .entries
                .as_ref()
                .and_then(|entries| entries.peek(&key))
                .map(|entry| (entry.value, entry.gradient.clone()));

            if let Some(found) = hit {
                cache.hits += 1;
                return found;
            }
            cache.misses += 1;
        }

        // The borrow is released while the inner objective runs
        let (value, gradient) = self.inner.eval_at(point);

        if let Some(entries) = self.cache.borrow_mut().entries.as_mut() {
            entries.push(
                key,
                CacheEntry {
                    value,
                    gradient: gradient.clone(),
                },
            );
        }

        (value, gradient)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

impl<T, G> Debug for CachingGradientFn<T, G>
where
    T: Scalar,
    G: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("CachingGradientFn")
            .field("inner", &self.inner)
            .field("max_to_cache", &self.max_to_cache)
            .field("len", &cache.entries.as_ref().map_or(0, |e| e.len()))
            .field("hits", &cache.hits)
            .field("misses", &cache.misses)
            .finish()
    }
}
