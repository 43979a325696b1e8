//! Least Frequently Used (LFU) cache with optional frequency aging.
//!
//! Entries live in [`FrequencyBuckets`]: the victim is the entry with the
//! lowest frequency, and among equals the one that reached that frequency
//! first.
//!
//! ## Aging
//!
//! Plain LFU never forgets: a key that was hot an hour ago keeps its high
//! count and can pin the cache. With aging enabled the cache tracks the sum of
//! all frequencies; once the average frequency exceeds `max_average`, every
//! frequency is lowered by `max_average / 2` (never below 1).
//!
//! ```text
//!   max_average = 10, entries {a: 30, b: 2, c: 1}  → average 11 > 10
//!   age_by(5)                                       → {a: 25, b: 1, c: 1}
//! ```
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.frequency(&"a"), Some(2));
//! ```
use std::hash::Hash;

use tracing::{debug, trace};

use crate::ds::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Default aging threshold used by the builder.
pub const DEFAULT_MAX_AVERAGE: u64 = 10;

#[derive(Debug, Clone, Copy)]
struct Aging {
    max_average: u64,
    total: u64,
}

#[derive(Debug)]
pub struct LfuCache<K, V> {
    buckets: FrequencyBuckets<K, V>,
    capacity: usize,
    aging: Option<Aging>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::with_capacity(capacity),
            capacity,
            aging: None,
        }
    }

    /// LFU that ages frequencies once their average exceeds `max_average`.
    ///
    /// # Panics
    ///
    /// Panics if `max_average` is below 2. Use [`try_with_aging`](Self::try_with_aging)
    /// for a fallible constructor.
    pub fn with_aging(capacity: usize, max_average: u64) -> Self {
        match Self::try_with_aging(capacity, max_average) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`with_aging`](Self::with_aging).
    ///
    /// `max_average` must be at least 2 so each aging pass lowers frequencies
    /// by a non-zero amount.
    pub fn try_with_aging(capacity: usize, max_average: u64) -> Result<Self, ConfigError> {
        if max_average < 2 {
            return Err(ConfigError::new("aging max_average must be >= 2"));
        }
        let mut cache = Self::new(capacity);
        cache.aging = Some(Aging {
            max_average,
            total: 0,
        });
        Ok(cache)
    }

    pub fn is_aging(&self) -> bool {
        self.aging.is_some()
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.buckets.get(key)
    }

    /// Sum of all resident frequencies.
    pub fn total_frequency(&self) -> u64 {
        match self.aging {
            Some(aging) => aging.total,
            None => self.buckets.total_frequency(),
        }
    }

    /// Integer average frequency, `0` when empty.
    pub fn average_frequency(&self) -> u64 {
        match self.buckets.len() as u64 {
            0 => 0,
            len => self.total_frequency() / len,
        }
    }

    fn note_access(&mut self) {
        let Some(aging) = self.aging.as_mut() else {
            return;
        };
        aging.total = aging.total.saturating_add(1);
        let len = self.buckets.len() as u64;
        if len == 0 || aging.total / len <= aging.max_average {
            return;
        }
        let amount = aging.max_average / 2;
        let before = aging.total;
        aging.total = self.buckets.age_by(amount);
        debug!(amount, before, after = aging.total, "lfu aged frequencies");
    }

    fn note_departure(&mut self, frequency: u64) {
        if let Some(aging) = self.aging.as_mut() {
            aging.total = aging.total.saturating_sub(frequency);
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;
        if self.buckets.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lfu holds {} entries over capacity {}",
                self.buckets.len(),
                self.capacity
            )));
        }
        if let Some(aging) = self.aging {
            let actual = self.buckets.total_frequency();
            if aging.total != actual {
                return Err(InvariantError::new(format!(
                    "lfu tracks total frequency {} but buckets sum to {actual}",
                    aging.total
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.buckets.contains(&key) {
            self.buckets.touch(&key);
            let previous = self.buckets.insert(key, value);
            self.note_access();
            return previous;
        }
        if self.capacity == 0 {
            return None;
        }
        if self.buckets.len() >= self.capacity
            && let Some(victim) = self.buckets.pop_min()
        {
            trace!(frequency = victim.counter, "lfu evicted minimum");
            self.note_departure(victim.counter);
        }
        self.buckets.insert(key, value);
        self.note_access();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.buckets.touch(key)?;
        self.note_access();
        self.buckets.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.buckets.clear();
        if let Some(aging) = self.aging.as_mut() {
            aging.total = 0;
        }
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.buckets.remove(key)?;
        self.note_departure(entry.counter);
        Some(entry.value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let entry = self.buckets.pop_min()?;
        self.note_departure(entry.counter);
        Some(entry.into_pair())
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.buckets.peek_min().map(|entry| (&entry.key, &entry.value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }
}
