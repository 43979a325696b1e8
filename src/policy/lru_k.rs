//! LRU-K cache: admission after `k` touches.
//!
//! A key seen for the first time is parked in a bounded history list together
//! with its value and a touch count. Every further `get` or `insert` of the
//! key bumps the count; at `k` touches the key moves into the main LRU cache.
//! One-off keys from a scan therefore churn the history, not the main cache.
//!
//! ```text
//!   insert(x) ──► history: LruCache<K, Pending<V>>   (touches < k)
//!                         │ touches == k
//!                         ▼
//!                 main: LruCache<K, V>               (plain LRU from here on)
//! ```
//!
//! `get` only returns values from the main cache; `contains`, `len` and
//! `remove` are about main-cache residents too.
//!
//! ```
//! use evictkit::policy::lru_k::LruKCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruKCache::new(8);
//! cache.insert("page", 1);
//! assert!(!cache.contains(&"page"));
//!
//! assert_eq!(cache.get(&"page"), Some(&1));
//! assert!(cache.contains(&"page"));
//! ```
use std::hash::Hash;

use tracing::trace;

use crate::error::{ConfigError, InvariantError};
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache};

pub const DEFAULT_K: usize = 2;

#[derive(Debug)]
struct Pending<V> {
    value: V,
    touches: usize,
}

#[derive(Debug)]
pub struct LruKCache<K, V> {
    main: LruCache<K, V>,
    history: LruCache<K, Pending<V>>,
    k: usize,
}

impl<K, V> LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// LRU-2 with a history as large as the main cache.
    pub fn new(capacity: usize) -> Self {
        Self::build(capacity, DEFAULT_K, capacity)
    }

    /// # Panics
    ///
    /// Panics if `k` is zero.
    pub fn with_k(capacity: usize, k: usize, history_capacity: usize) -> Self {
        match Self::try_new(capacity, k, history_capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(capacity: usize, k: usize, history_capacity: usize) -> Result<Self, ConfigError> {
        if k == 0 {
            return Err(ConfigError::new("lru-k requires k > 0"));
        }
        Ok(Self::build(capacity, k, history_capacity))
    }

    fn build(capacity: usize, k: usize, history_capacity: usize) -> Self {
        Self {
            main: LruCache::new(capacity),
            history: LruCache::new(history_capacity),
            k,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Touches recorded for a key that has not been admitted yet.
    pub fn access_count(&self, key: &K) -> Option<usize> {
        self.history.peek(key).map(|pending| pending.touches)
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.main.peek(key)
    }

    /// Bumps the touch count of a pending key and admits it at `k` touches.
    fn touch_pending(&mut self, key: &K, value: Option<V>) {
        let admit = match self.history.get_mut(key) {
            Some(pending) => {
                pending.touches += 1;
                if let Some(value) = value {
                    pending.value = value;
                }
                pending.touches >= self.k
            },
            None => return,
        };
        if admit && let Some(pending) = self.history.remove(key) {
            trace!(touches = pending.touches, "lru-k admitted key to main cache");
            self.main.push(key.clone(), pending.value);
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.main.check_invariants()?;
        self.history.check_invariants()?;
        if self.main.keys().any(|key| self.history.contains(key)) {
            return Err(InvariantError::new("key is both admitted and pending"));
        }
        if self.history.iter().any(|(_, pending)| pending.touches >= self.k) {
            return Err(InvariantError::new("pending key reached k touches without admission"));
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.main.contains(&key) {
            return self.main.insert(key, value);
        }
        if self.history.contains(&key) {
            self.touch_pending(&key, Some(value));
            return None;
        }
        if self.k <= 1 {
            self.main.push(key, value);
            return None;
        }
        self.history.push(key, Pending { value, touches: 1 });
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.touch_pending(key, None);
        self.main.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.main.contains(key)
    }

    fn len(&self) -> usize {
        self.main.len()
    }

    fn capacity(&self) -> usize {
        self.main.capacity()
    }

    fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.history.remove(key);
        self.main.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_k_admits_after_k_touches() {
        let mut cache = LruKCache::with_k(4, 3, 4);
        cache.insert("a", 1);
        assert_eq!(cache.access_count(&"a"), Some(1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.access_count(&"a"), Some(2));
        assert!(!cache.contains(&"a"));

        cache.insert("a", 2);
        assert!(cache.contains(&"a"));
        assert_eq!(cache.access_count(&"a"), None);
        assert_eq!(cache.get(&"a"), Some(&2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_k_scan_does_not_disturb_main() {
        let mut cache = LruKCache::with_k(2, 2, 2);
        for key in [1, 2] {
            cache.insert(key, 0);
            cache.get(&key);
        }
        for key in 100..110 {
            cache.insert(key, key);
        }
        assert!(cache.contains(&1));
        assert!(cache.contains(&2));
        assert_eq!(cache.history_len(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_k_history_is_bounded() {
        let mut cache = LruKCache::with_k(4, 2, 2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        assert_eq!(cache.history_len(), 2);
        assert_eq!(cache.access_count(&1), None);
        // 1 fell out of history, so this restarts its count
        cache.insert(1, 1);
        assert!(!cache.contains(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_k_with_k_one_is_plain_lru() {
        let mut cache = LruKCache::with_k(2, 1, 2);
        cache.insert("a", 1);
        assert!(cache.contains(&"a"));
        assert_eq!(cache.history_len(), 0);
    }

    #[test]
    fn lru_k_rejects_zero_k() {
        let err = LruKCache::<u32, u32>::try_new(4, 0, 4).unwrap_err();
        assert!(err.message().contains("k > 0"));
    }

    #[test]
    fn lru_k_remove_forgets_pending_and_resident() {
        let mut cache = LruKCache::new(4);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.get(&2);
        assert_eq!(cache.remove(&1), None);
        assert_eq!(cache.access_count(&1), None);
        assert_eq!(cache.remove(&2), Some(2));
        assert!(cache.is_empty());
    }
}
