//! Unified cache builder for all eviction policies.
//!
//! Maps a [`CachePolicy`] to a concrete cache and hides it behind one
//! [`Cache`] type, so callers can switch policies without changing types.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Arc);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::ArcCore;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LruKCache;
use crate::traits::{CoreCache, MutableCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, no aging.
    Lfu,
    /// LFU whose frequencies are lowered once their average exceeds `max_average`.
    AgingLfu { max_average: u64 },
    /// Admission after `k` touches, tracked in a history of `history` keys.
    LruK { k: usize, history: usize },
    /// Adaptive replacement between a recency and a frequency partition.
    Arc,
}

impl CachePolicy {
    /// Short label for reports.
    pub fn name(&self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::AgingLfu { .. } => "aging-lfu",
            CachePolicy::LruK { .. } => "lru-k",
            CachePolicy::Arc => "arc",
        }
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
    policy: CachePolicy,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    LruK(LruKCache<K, V>),
    Arc(ArcCore<K, V>),
}

impl<K, V> Cache<K, V> {
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, value),
            CacheInner::Lfu(lfu) => lfu.insert(key, value),
            CacheInner::LruK(lruk) => lruk.insert(key, value),
            CacheInner::Arc(arc) => arc.insert(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::LruK(lruk) => lruk.get(key),
            CacheInner::Arc(arc) => arc.get(key),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::LruK(lruk) => lruk.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::LruK(lruk) => lruk.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::LruK(lruk) => lruk.capacity(),
            CacheInner::Arc(arc) => arc.capacity(),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::LruK(lruk) => lruk.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
            CacheInner::LruK(lruk) => lruk.remove(key),
            CacheInner::Arc(arc) => arc.remove(key),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics on an invalid policy parameter (`k == 0`, `max_average < 2`).
    /// Use [`try_build`](Self::try_build) to get the error instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lru_2 = CacheBuilder::new(100).build::<u64, String>(CachePolicy::LruK { k: 2, history: 100 });
    /// let aging = CacheBuilder::new(100).build::<u64, String>(CachePolicy::AgingLfu { max_average: 10 });
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let err = CacheBuilder::new(8)
    ///     .try_build::<u64, u64>(CachePolicy::LruK { k: 0, history: 8 })
    ///     .unwrap_err();
    /// assert!(err.message().contains("k > 0"));
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::AgingLfu { max_average } => {
                CacheInner::Lfu(LfuCache::try_with_aging(self.capacity, max_average)?)
            },
            CachePolicy::LruK { k, history } => {
                CacheInner::LruK(LruKCache::try_new(self.capacity, k, history)?)
            },
            CachePolicy::Arc => CacheInner::Arc(ArcCore::new(self.capacity)),
        };
        Ok(Cache { inner, policy })
    }
}
