//! Adaptive Replacement Cache (ARC).
//!
//! Two partitions share a fixed total capacity. New keys land in the recency
//! partition; a second access promotes them to the frequency partition. Each
//! partition remembers the keys it recently evicted in a ghost list, and a
//! hit on a ghost moves one unit of capacity toward the partition that lost
//! the key, so the split follows the workload.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │                           ArcCore<K, V>                                   │
//! │                                                                           │
//! │   RecencyStore (capacity r)                FrequencyStore (capacity f)    │
//! │   ┌───────────────────────────┐            ┌───────────────────────────┐  │
//! │   │ T1: IntrusiveList<Entry>  │  promote   │ T2: FrequencyBuckets      │  │
//! │   │ head [c] ◄─► [b] ◄─► [a] ─┼──(get)────►│  1: [e] ◄─► [d]           │  │
//! │   │ MRU              LRU      │            │  4: [x]                   │  │
//! │   └────────────┬──────────────┘            └────────────┬──────────────┘  │
//! │           evict│                                   evict│                 │
//! │                ▼                                        ▼                 │
//! │   ┌───────────────────────────┐            ┌───────────────────────────┐  │
//! │   │ B1: GhostList<K> (≤ r)    │            │ B2: GhostList<K> (≤ f)    │  │
//! │   └───────────────────────────┘            └───────────────────────────┘  │
//! │                                                                           │
//! │   r + f == capacity, always                                               │
//! │   B1 hit: f → r (one unit)        B2 hit: r → f (one unit, r stays ≥ 1)   │
//! └───────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! `get(k)`:
//!   1. ghost hit on either side → rebalance, return miss
//!   2. resident in T1 → count the access, transfer to T2, return value
//!   3. resident in T2 → raise frequency, return value
//!   4. miss
//!
//! `insert(k, v)`:
//!   1. consume a ghost hit if there is one (rebalance)
//!   2. resident in T1 → transfer to T2 with the new value
//!   3. resident in T2 → update in place
//!   4. otherwise insert into T1
//!
//! Residents over a partition's capacity after a rebalance are evicted the
//! next time that partition admits a new key; ghost lists are trimmed at once.
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::arc::{ArcCore, Residency};
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = ArcCore::new(4);
//! cache.insert("page1", 1);
//! assert_eq!(cache.residency(&"page1"), Residency::Recency);
//!
//! assert_eq!(cache.get(&"page1"), Some(&1));
//! assert_eq!(cache.residency(&"page1"), Residency::Frequency);
//! assert_eq!(cache.recency_capacity() + cache.frequency_capacity(), 4);
//! ```
//!
//! ## Thread Safety
//!
//! [`ArcCore`] is a plain `&mut self` type. [`ConcurrentArcCache`] wraps it in
//! a single `parking_lot::Mutex`, so a ghost check, a transfer and a capacity
//! shift happen as one step for every caller.
pub mod frequency;
pub mod recency;

use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

pub use frequency::FrequencyStore;
pub use recency::RecencyStore;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ArcMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    ArcMetricsRecorder, CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};
use crate::traits::{ConcurrentCache, CoreCache, MutableCache};

/// Result of a `put` on one of the ARC partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<V> {
    /// The key was resident; carries the replaced value.
    Updated(V),
    /// A new entry was linked after evicting `evicted` residents.
    Inserted { evicted: usize },
    /// The partition has no capacity; nothing was linked.
    Rejected { evicted: usize },
}

impl<V> PutOutcome<V> {
    pub fn evicted(&self) -> usize {
        match self {
            PutOutcome::Updated(_) => 0,
            PutOutcome::Inserted { evicted } | PutOutcome::Rejected { evicted } => *evicted,
        }
    }

    pub fn into_previous(self) -> Option<V> {
        match self {
            PutOutcome::Updated(previous) => Some(previous),
            _ => None,
        }
    }
}

/// Where a key currently lives inside an [`ArcCore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    /// Neither resident nor remembered.
    Absent,
    /// Resident in the recency partition (T1).
    Recency,
    /// Resident in the frequency partition (T2).
    Frequency,
    /// Evicted from the recency partition; tracked in B1.
    RecencyGhost,
    /// Evicted from the frequency partition; tracked in B2.
    FrequencyGhost,
}

/// Single-threaded ARC engine.
#[derive(Debug)]
pub struct ArcCore<K, V> {
    recency: RecencyStore<K, V>,
    frequency: FrequencyStore<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V> ArcCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an engine holding at most `capacity` entries overall.
    ///
    /// The recency partition starts with the larger half when `capacity` is odd.
    pub fn new(capacity: usize) -> Self {
        let frequency = capacity / 2;
        Self {
            recency: RecencyStore::new(capacity - frequency),
            frequency: FrequencyStore::new(frequency),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        }
    }

    pub fn recency_capacity(&self) -> usize {
        self.recency.capacity()
    }

    pub fn frequency_capacity(&self) -> usize {
        self.frequency.capacity()
    }

    pub fn recency_len(&self) -> usize {
        self.recency.len()
    }

    pub fn frequency_len(&self) -> usize {
        self.frequency.len()
    }

    pub fn recency_ghost_len(&self) -> usize {
        self.recency.ghost_len()
    }

    pub fn frequency_ghost_len(&self) -> usize {
        self.frequency.ghost_len()
    }

    pub fn recency(&self) -> &RecencyStore<K, V> {
        &self.recency
    }

    pub fn frequency(&self) -> &FrequencyStore<K, V> {
        &self.frequency
    }

    pub fn residency(&self, key: &K) -> Residency {
        if self.recency.contains(key) {
            Residency::Recency
        } else if self.frequency.contains(key) {
            Residency::Frequency
        } else if self.recency.contains_ghost(key) {
            Residency::RecencyGhost
        } else if self.frequency.contains_ghost(key) {
            Residency::FrequencyGhost
        } else {
            Residency::Absent
        }
    }

    /// Returns the value without counting an access or promoting.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.recency.peek(key).or_else(|| self.frequency.peek(key))
    }

    /// Consumes a ghost marker for `key` and moves one unit of capacity toward
    /// the partition that evicted it. Returns whether a marker was consumed.
    ///
    /// The receiving partition only grows when the other one actually had a
    /// unit to give, so the two capacities always sum to the total. The
    /// recency partition keeps its last unit: every new key enters there.
    pub fn check_ghost(&mut self, key: &K) -> bool {
        if self.recency.check_ghost(key) {
            let shifted = self.frequency.decrease_capacity();
            if shifted {
                self.recency.increase_capacity();
            }
            trace!(
                shifted,
                recency_capacity = self.recency.capacity(),
                frequency_capacity = self.frequency.capacity(),
                "recency ghost hit"
            );
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_recency_ghost_hit();
                if shifted {
                    self.metrics.record_recency_capacity_gain();
                }
            }
            return true;
        }

        if self.frequency.check_ghost(key) {
            let shifted = self.recency.capacity() > 1 && self.recency.decrease_capacity();
            if shifted {
                self.frequency.increase_capacity();
            }
            trace!(
                shifted,
                recency_capacity = self.recency.capacity(),
                frequency_capacity = self.frequency.capacity(),
                "frequency ghost hit"
            );
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_frequency_ghost_hit();
                if shifted {
                    self.metrics.record_frequency_capacity_gain();
                }
            }
            return true;
        }

        false
    }

    /// Moves `key` from the recency partition into the frequency partition
    /// with `value`. Returns the value the recency entry held.
    ///
    /// With no frequency capacity the entry is updated in place instead.
    fn transfer(&mut self, key: K, value: V) -> Option<V> {
        if self.frequency.capacity() == 0 {
            return self.recency.put(key, value).into_previous();
        }
        let previous = self.recency.take(&key).map(|entry| entry.value);
        let outcome = self.frequency.put(key, value);
        let evicted = outcome.evicted();
        trace!(evicted, "promoted entry to frequency partition");
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_promotion();
            self.metrics.record_frequency_evictions(evicted);
        }
        previous
    }

    fn note_get(&mut self, hit: bool) {
        #[cfg(feature = "metrics")]
        if hit {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        #[cfg(not(feature = "metrics"))]
        let _ = hit;
    }

    /// Checks containment, capacity conservation and the ghost bounds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.recency.check_invariants()?;
        self.frequency.check_invariants()?;

        let split = self.recency.capacity() + self.frequency.capacity();
        if split != self.capacity {
            return Err(InvariantError::new(format!(
                "partition capacities {} + {} do not sum to {}",
                self.recency.capacity(),
                self.frequency.capacity(),
                self.capacity
            )));
        }

        for key in self.recency.keys() {
            if self.frequency.contains(key) {
                return Err(InvariantError::new("key resident in both partitions"));
            }
            if self.frequency.contains_ghost(key) {
                return Err(InvariantError::new(
                    "recency resident is also a frequency ghost",
                ));
            }
        }
        for key in self.frequency.keys() {
            if self.recency.contains_ghost(key) {
                return Err(InvariantError::new(
                    "frequency resident is also a recency ghost",
                ));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for ArcCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        self.check_ghost(&key);

        if self.recency.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self.transfer(key, value);
        }

        if self.frequency.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self.frequency.put(key, value).into_previous();
        }

        let outcome = self.recency.put(key, value);
        #[cfg(feature = "metrics")]
        {
            if matches!(outcome, PutOutcome::Inserted { .. }) {
                self.metrics.record_insert_new();
            }
            self.metrics.record_recency_evictions(outcome.evicted());
        }
        outcome.into_previous()
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.check_ghost(key) {
            self.note_get(false);
            return None;
        }

        if self.recency.contains(key) {
            self.note_get(true);
            self.recency.get(key);
            if self.frequency.capacity() == 0 {
                return self.recency.peek(key);
            }
            let (owned, value) = self.recency.take(key)?.into_pair();
            self.transfer(owned, value);
            return self.frequency.peek(key);
        }

        let hit = self.frequency.contains(key);
        self.note_get(hit);
        self.frequency.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.recency.contains(key) || self.frequency.contains(key)
    }

    fn len(&self) -> usize {
        self.recency.len() + self.frequency.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops residents and ghosts and restores the initial split.
    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let frequency = self.capacity / 2;
        self.recency.reset(self.capacity - frequency);
        self.frequency.reset(frequency);
    }
}

impl<K, V> MutableCache<K, V> for ArcCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.recency
            .take(key)
            .or_else(|| self.frequency.take(key))
            .map(|entry| entry.value)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            recency_evictions: self.metrics.recency_evictions,
            frequency_evictions: self.metrics.frequency_evictions,
            promotions: self.metrics.promotions,
            recency_ghost_hits: self.metrics.recency_ghost_hits,
            frequency_ghost_hits: self.metrics.frequency_ghost_hits,
            recency_capacity_gains: self.metrics.recency_capacity_gains,
            frequency_capacity_gains: self.metrics.frequency_capacity_gains,
            recency_len: self.recency.len(),
            frequency_len: self.frequency.len(),
            recency_capacity: self.recency.capacity(),
            frequency_capacity: self.frequency.capacity(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for ArcCore<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics = ArcMetrics::default();
    }
}

/// Thread-safe ARC cache: one [`ArcCore`] behind one mutex.
///
/// Values are returned by clone so no reference outlives the lock.
///
/// ```
/// use evictkit::policy::arc::ConcurrentArcCache;
/// use evictkit::traits::ConcurrentCache;
///
/// let cache = ConcurrentArcCache::new(2);
/// cache.put("a", 1);
/// assert_eq!(cache.get(&"a"), Some(1));
/// assert!(cache.remove(&"a"));
/// assert!(!cache.contains(&"a"));
/// ```
#[derive(Debug)]
pub struct ConcurrentArcCache<K, V> {
    inner: Mutex<ArcCore<K, V>>,
}

impl<K, V> ConcurrentArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(ArcCore::new(capacity)),
        }
    }

    pub fn recency_capacity(&self) -> usize {
        self.inner.lock().recency_capacity()
    }

    pub fn frequency_capacity(&self) -> usize {
        self.inner.lock().frequency_capacity()
    }

    pub fn residency(&self, key: &K) -> Residency {
        self.inner.lock().residency(key)
    }

    /// Runs `f` with the engine locked.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut ArcCore<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    pub fn into_inner(self) -> ArcCore<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> ConcurrentCache<K, V> for ConcurrentArcCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    fn put(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    fn remove(&self, key: &K) -> bool {
        MutableCache::remove(&mut *self.inner.lock(), key).is_some()
    }

    fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ConcurrentArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_split(cache: &ArcCore<u32, u32>, recency: usize, frequency: usize) {
        assert_eq!(cache.recency_capacity(), recency, "recency capacity");
        assert_eq!(cache.frequency_capacity(), frequency, "frequency capacity");
    }

    #[test]
    fn arc_new_splits_capacity() {
        assert_split(&ArcCore::new(4), 2, 2);
        assert_split(&ArcCore::new(5), 3, 2);
        assert_split(&ArcCore::new(1), 1, 0);
        assert_split(&ArcCore::new(0), 0, 0);
    }

    #[test]
    fn arc_put_then_get_promotes() {
        let mut cache = ArcCore::new(4);
        cache.insert(1, 10);
        assert_eq!(cache.residency(&1), Residency::Recency);

        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.residency(&1), Residency::Frequency);
        assert!(!cache.recency().contains(&1));
        assert_eq!(cache.frequency().frequency(&1), Some(1));

        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.frequency().frequency(&1), Some(2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_put_on_recency_resident_transfers_new_value() {
        let mut cache = ArcCore::new(4);
        cache.insert(1, 10);
        assert_eq!(cache.insert(1, 11), Some(10));
        assert_eq!(cache.residency(&1), Residency::Frequency);
        assert_eq!(cache.peek(&1), Some(&11));

        assert_eq!(cache.insert(1, 12), Some(11));
        assert_eq!(cache.frequency().frequency(&1), Some(2));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_recency_ghost_hit_shifts_one_unit() {
        let mut cache = ArcCore::new(4);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        assert_eq!(cache.residency(&1), Residency::RecencyGhost);

        cache.insert(1, 1);
        assert_split(&cache, 3, 1);
        assert_eq!(cache.residency(&1), Residency::Recency);
        assert_eq!(cache.recency_len(), 3);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_frequency_ghost_hit_shifts_one_unit() {
        let mut cache = ArcCore::new(4);
        for key in [1, 2, 3] {
            cache.insert(key, key);
            cache.get(&key);
        }
        assert_eq!(cache.residency(&1), Residency::FrequencyGhost);

        cache.insert(1, 1);
        assert_split(&cache, 1, 3);
        assert_eq!(cache.residency(&1), Residency::Recency);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_on_get_is_a_miss_but_rebalances() {
        let mut cache = ArcCore::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.residency(&1), Residency::RecencyGhost);

        assert_eq!(cache.get(&1), None);
        assert_split(&cache, 2, 0);
        assert_eq!(cache.residency(&1), Residency::Absent);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_frequency_ghost_hit_keeps_last_recency_unit() {
        let mut cache = ArcCore::new(2);
        cache.insert(1, 1);
        cache.get(&1);
        cache.insert(2, 2);
        cache.get(&2);
        assert_eq!(cache.residency(&1), Residency::FrequencyGhost);

        cache.insert(1, 1);
        assert_split(&cache, 1, 1);
        assert_eq!(cache.residency(&1), Residency::Recency);

        for key in 100..200 {
            cache.insert(key, key);
            assert_eq!(cache.get(&key), Some(&key));
            assert_eq!(cache.get(&key), Some(&key));
        }
        assert_split(&cache, 1, 1);
        assert!(cache.contains(&199));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_with_empty_donor_keeps_total() {
        let mut cache = ArcCore::new(1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert!(cache.check_ghost(&1));
        assert_split(&cache, 1, 0);
        assert!(!cache.check_ghost(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_without_frequency_capacity_keeps_entry_in_recency() {
        let mut cache = ArcCore::new(1);
        cache.insert(1, 10);
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.residency(&1), Residency::Recency);
        assert_eq!(cache.insert(1, 11), Some(10));
        assert_eq!(cache.residency(&1), Residency::Recency);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_zero_capacity_is_noop() {
        let mut cache = ArcCore::new(0);
        assert_eq!(cache.insert(1, 1), None);
        assert_eq!(cache.get(&1), None);
        assert!(!cache.contains(&1));
        assert!(cache.is_empty());
        assert_eq!(cache.remove(&1), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_remove_is_idempotent_and_leaves_no_ghost() {
        let mut cache = ArcCore::new(4);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.get(&2);

        assert_eq!(cache.remove(&1), Some(1));
        assert_eq!(cache.remove(&2), Some(2));
        assert_eq!(cache.remove(&1), None);
        assert_eq!(cache.residency(&1), Residency::Absent);
        assert_eq!(cache.residency(&2), Residency::Absent);
        assert_split(&cache, 2, 2);
    }

    #[test]
    fn arc_miss_then_hit_round_trip() {
        let mut cache = ArcCore::new(4);
        assert_eq!(cache.get(&7), None);
        cache.insert(7, 70);
        assert_eq!(cache.get(&7), Some(&70));
    }

    #[test]
    fn arc_clear_restores_initial_split() {
        let mut cache = ArcCore::new(4);
        for key in 0..6 {
            cache.insert(key, key);
        }
        cache.insert(0, 0);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.recency_ghost_len(), 0);
        assert_split(&cache, 2, 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn concurrent_arc_matches_core_behavior() {
        let cache = ConcurrentArcCache::new(4);
        cache.put(1u32, 10u32);
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.residency(&1), Residency::Frequency);
        assert_eq!(cache.len(), 1);
        assert!(cache.remove(&1));
        assert!(!cache.remove(&1));
        cache.check_invariants().unwrap();
        assert_eq!(cache.into_inner().capacity(), 4);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_track_promotions_and_ghost_hits() {
        let mut cache = ArcCore::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.get(&1);
        cache.get(&2);

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.recency_evictions, 1);
        assert_eq!(snapshot.get_misses, 1);
        assert_eq!(snapshot.recency_ghost_hits, 1);
        assert_eq!(snapshot.recency_capacity_gains, 1);
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.promotions, 0);

        cache.reset_metrics();
        assert_eq!(cache.snapshot().get_calls, 0);
    }

    mod property_tests {
        use std::collections::HashMap;

        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u32, u32),
            Get(u32),
            Remove(u32),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (0u32..24, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
                3 => (0u32..24).prop_map(Op::Get),
                1 => (0u32..24).prop_map(Op::Remove),
            ]
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_invariants_hold_after_every_op(
                capacity in 0usize..12,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache: ArcCore<u32, u32> = ArcCore::new(capacity);
                for op in ops {
                    match op {
                        Op::Put(k, v) => { cache.insert(k, v); },
                        Op::Get(k) => { cache.get(&k); },
                        Op::Remove(k) => { cache.remove(&k); },
                    }
                    prop_assert!(cache.check_invariants().is_ok(), "{:?}", cache.check_invariants());
                    prop_assert_eq!(cache.recency_capacity() + cache.frequency_capacity(), capacity);
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_hits_return_last_written_value(
                capacity in 1usize..12,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache: ArcCore<u32, u32> = ArcCore::new(capacity);
                let mut model: HashMap<u32, u32> = HashMap::new();
                for op in ops {
                    match op {
                        Op::Put(k, v) => {
                            cache.insert(k, v);
                            model.insert(k, v);
                        },
                        Op::Get(k) => {
                            if let Some(&value) = cache.get(&k) {
                                prop_assert_eq!(Some(&value), model.get(&k));
                            }
                        },
                        Op::Remove(k) => {
                            cache.remove(&k);
                            model.remove(&k);
                        },
                    }
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_ghost_lists_stay_within_partition_capacity(
                capacity in 0usize..12,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache: ArcCore<u32, u32> = ArcCore::new(capacity);
                for op in ops {
                    match op {
                        Op::Put(k, v) => { cache.insert(k, v); },
                        Op::Get(k) => { cache.get(&k); },
                        Op::Remove(k) => { cache.remove(&k); },
                    }
                    prop_assert!(cache.recency_ghost_len() <= cache.recency_capacity());
                    prop_assert!(cache.frequency_ghost_len() <= cache.frequency_capacity());
                    prop_assert!(capacity == 0 || cache.recency_capacity() >= 1);
                }
            }
        }
    }
}
