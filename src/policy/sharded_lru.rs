//! Sharded LRU cache for concurrent access.
//!
//! The key space is split across `shards` independent [`LruCache`]s, each
//! behind its own `parking_lot::Mutex`. A [`ShardSelector`] routes each key to
//! exactly one shard, so operations on keys in different shards never contend.
//!
//! ```text
//!   key ──► ShardSelector ──► shard i ──► Mutex<LruCache<K, V>>
//!
//!   capacity 10, shards 4  →  per-shard capacity ceil(10 / 4) = 3
//! ```
//!
//! Eviction order is LRU within a shard only. The total capacity reported is
//! the sum of shard capacities, which may round the requested value up.
//!
//! ```
//! use evictkit::policy::sharded_lru::ShardedLruCache;
//! use evictkit::traits::ConcurrentCache;
//!
//! let cache = ShardedLruCache::new(64, 4);
//! cache.put("a", 1);
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert_eq!(cache.capacity(), 64);
//! ```
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::ds::ShardSelector;
use crate::error::{ConfigError, InvariantError};
use crate::policy::lru::LruCache;
use crate::traits::{ConcurrentCache, CoreCache, MutableCache};

const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug)]
pub struct ShardedLruCache<K, V> {
    shards: Vec<Mutex<LruCache<K, V>>>,
    selector: ShardSelector,
    shard_capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `shards` is zero.
    pub fn new(capacity: usize, shards: usize) -> Self {
        Self::with_seed(capacity, shards, DEFAULT_SEED)
    }

    /// # Panics
    ///
    /// Panics if `shards` is zero.
    pub fn with_seed(capacity: usize, shards: usize, seed: u64) -> Self {
        match Self::try_with_seed(capacity, shards, seed) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(capacity: usize, shards: usize) -> Result<Self, ConfigError> {
        Self::try_with_seed(capacity, shards, DEFAULT_SEED)
    }

    pub fn try_with_seed(capacity: usize, shards: usize, seed: u64) -> Result<Self, ConfigError> {
        if shards == 0 {
            return Err(ConfigError::new("sharded lru requires at least one shard"));
        }
        let selector = ShardSelector::new(shards, seed);
        let shard_capacity = selector.shard_capacity(capacity);
        debug!(capacity, shards, shard_capacity, "built sharded lru");
        Ok(Self {
            shards: (0..shards)
                .map(|_| Mutex::new(LruCache::new(shard_capacity)))
                .collect(),
            selector,
            shard_capacity,
        })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    /// Index of the shard that owns `key`.
    pub fn shard_for(&self, key: &K) -> usize {
        self.selector.shard_for_key(key)
    }

    /// Number of entries held by one shard.
    pub fn shard_len(&self, shard: usize) -> Option<usize> {
        self.shards.get(shard).map(|lock| lock.lock().len())
    }

    fn shard(&self, key: &K) -> &Mutex<LruCache<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (index, lock) in self.shards.iter().enumerate() {
            let shard = lock.lock();
            shard.check_invariants()?;
            if shard.keys().any(|key| self.shard_for(key) != index) {
                return Err(InvariantError::new(format!(
                    "shard {index} holds a key routed elsewhere"
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> ConcurrentCache<K, V> for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.shard(key).lock().get(key).cloned()
    }

    fn put(&self, key: K, value: V) {
        self.shard(&key).lock().insert(key, value);
    }

    fn remove(&self, key: &K) -> bool {
        self.shard(key).lock().remove(key).is_some()
    }

    fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|lock| lock.lock().len()).sum()
    }

    fn capacity(&self) -> usize {
        self.shard_capacity * self.shards.len()
    }

    fn clear(&self) {
        for lock in &self.shards {
            lock.lock().clear();
        }
    }
}
