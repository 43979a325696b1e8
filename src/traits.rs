//! # Cache Trait Hierarchy
//!
//! Every policy in the crate implements the same small set of traits, so code
//! can be written against the contract rather than a concrete policy.
//!
//! ```text
//!                    ┌─────────────────────────────────────┐
//!                    │          CoreCache<K, V>            │
//!                    │  insert(&mut, K, V) → Option<V>     │
//!                    │  get(&mut, &K) → Option<&V>         │
//!                    │  contains / len / capacity / clear  │
//!                    └──────────────────┬──────────────────┘
//!                                       │
//!                                       ▼
//!                    ┌─────────────────────────────────────┐
//!                    │         MutableCache<K, V>          │
//!                    │  remove(&K) → Option<V>             │
//!                    │  remove_batch(&[K])                 │
//!                    └──────────┬───────────────┬──────────┘
//!                               │               │
//!                               ▼               ▼
//!             ┌──────────────────────┐   ┌──────────────────────┐
//!             │  LruCacheTrait<K, V> │   │  LfuCacheTrait<K, V> │
//!             │  pop_lru / peek_lru  │   │  pop_lfu / peek_lfu  │
//!             │  touch               │   │  frequency           │
//!             └──────────────────────┘   └──────────────────────┘
//!
//!   ConcurrentCache<K, V>: Send + Sync, &self methods, values returned by clone
//! ```
//!
//! | Trait             | Implemented by                                        |
//! |-------------------|-------------------------------------------------------|
//! | `CoreCache`       | `ArcCore`, `LruCache`, `LfuCache`, `LruKCache`, `Cache` |
//! | `MutableCache`    | same as above                                         |
//! | `LruCacheTrait`   | `LruCache`                                            |
//! | `LfuCacheTrait`   | `LfuCache`                                            |
//! | `ConcurrentCache` | `ConcurrentArcCache`, `ShardedLruCache`               |
//!
//! ## Thread Safety
//!
//! The single-threaded caches take `&mut self` and are not synchronized.
//! Share them behind a lock, or use one of the [`ConcurrentCache`]
//! implementations, which lock internally.

/// Operations every cache supports.
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::arc::ArcCore;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.to_string());
///     }
/// }
///
/// let mut cache = ArcCore::new(8);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key was
    /// resident. May evict according to the policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, counting the access.
    ///
    /// Use [`contains`](Self::contains) to test residency without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Residency test that leaves eviction state untouched.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that support removal by key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered caches.
///
/// ```
/// use evictkit::traits::{CoreCache, LruCacheTrait};
/// use evictkit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.touch(&"a");
/// assert_eq!(cache.peek_lru(), Some((&"b", &2)));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; `false` if it is not resident.
    fn touch(&mut self, key: &K) -> bool;
}

/// Frequency-ordered caches.
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the entry with the lowest frequency, earliest
    /// arrival first among ties.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    fn peek_lfu(&self) -> Option<(&K, &V)>;

    fn frequency(&self, key: &K) -> Option<u64>;
}

/// Thread-safe caches shared by reference.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use evictkit::policy::arc::ConcurrentArcCache;
/// use evictkit::traits::ConcurrentCache;
///
/// let cache = Arc::new(ConcurrentArcCache::new(64));
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || cache.put(t, t * 10))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cache.len(), 4);
/// ```
pub trait ConcurrentCache<K, V>: Send + Sync {
    /// Returns a clone of the value for `key`, counting the access.
    fn get(&self, key: &K) -> Option<V>;

    fn put(&self, key: K, value: V);

    /// Removes `key`; `true` if it was resident.
    fn remove(&self, key: &K) -> bool;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&self);
}
