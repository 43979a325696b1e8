//! Frequency-bucketed entry storage for LFU-style eviction.
//!
//! Entries are grouped by access frequency. Each bucket is an
//! [`IntrusiveList`] ordered by arrival into that bucket, so ties at the
//! minimum frequency break FIFO: the entry that reached the bucket first is
//! evicted first.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, (freq, SlotId)>
//!   ┌──────────┬───────────────┐
//!   │ "page_a" │ (3, id_0)     │───────────────────────────────┐
//!   │ "page_b" │ (1, id_1)     │──────────┐                    │
//!   │ "page_c" │ (1, id_2)     │───┐      │                    │
//!   └──────────┴───────────────┘   │      │                    │
//!                                  ▼      ▼                    ▼
//!   buckets: BTreeMap<u64, IntrusiveList<Entry<K, V>>>
//!     1 ─► head [page_c] ◄──► [page_b] tail   ◄── first_key_value(): victim page_b
//!     3 ─► head [page_a] tail
//! ```
//!
//! Empty buckets are dropped as soon as their last entry leaves, so the first
//! key of the map is always the minimum frequency in use.
//!
//! ## Operations
//!
//! | Operation   | Time            | Notes                                   |
//! |-------------|-----------------|-----------------------------------------|
//! | `insert`    | O(log buckets)  | New key starts at frequency 1           |
//! | `touch`     | O(log buckets)  | Frequency + 1, moves to new bucket head |
//! | `remove`    | O(log buckets)  |                                         |
//! | `pop_min`   | O(log buckets)  | Tail of the lowest bucket               |
//! | `age_by`    | O(n)            | Lowers every frequency, floor 1         |
//!
//! ## Example
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut buckets = FrequencyBuckets::new();
//! buckets.insert("a", 1);
//! buckets.insert("b", 2);
//! buckets.touch(&"a");
//!
//! assert_eq!(buckets.frequency(&"a"), Some(2));
//! assert_eq!(buckets.min_freq(), Some(1));
//!
//! let victim = buckets.pop_min().unwrap();
//! assert_eq!((victim.key, victim.counter), ("b", 1));
//! ```
use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::entry::Entry;
use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Entries grouped by frequency, FIFO within each frequency.
#[derive(Debug)]
pub struct FrequencyBuckets<K, V> {
    buckets: BTreeMap<u64, IntrusiveList<Entry<K, V>>>,
    index: FxHashMap<K, (u64, SlotId)>,
}

impl<K, V> FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty set of buckets with room for `capacity` keys in the index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: BTreeMap::new(),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct frequencies currently in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&(freq, _)| freq)
    }

    /// Lowest frequency in use, `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.first_key_value().map(|(&freq, _)| freq)
    }

    /// Returns the value for `key` without changing its frequency.
    pub fn get(&self, key: &K) -> Option<&V> {
        let &(freq, id) = self.index.get(key)?;
        self.buckets
            .get(&freq)
            .and_then(|bucket| bucket.get(id))
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let &(freq, id) = self.index.get(key)?;
        self.buckets
            .get_mut(&freq)
            .and_then(|bucket| bucket.get_mut(id))
            .map(|entry| &mut entry.value)
    }

    /// Inserts `key` at frequency 1, or replaces the value of a resident key.
    ///
    /// Returns the previous value on replacement. Replacing does not change the
    /// frequency; callers that count writes as accesses follow up with
    /// [`touch`](Self::touch).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        let id = self
            .buckets
            .entry(1)
            .or_default()
            .push_front(Entry::new(key.clone(), value));
        self.index.insert(key, (1, id));
        None
    }

    /// Raises the frequency of `key` by one and returns the new frequency.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let &(freq, id) = self.index.get(key)?;
        let mut entry = self.unlink(freq, id);
        let new_freq = entry.bump();
        let new_id = self.buckets.entry(new_freq).or_default().push_front(entry);
        if let Some(slot) = self.index.get_mut(key) {
            *slot = (new_freq, new_id);
        }
        Some(new_freq)
    }

    pub fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let (freq, id) = self.index.remove(key)?;
        Some(self.unlink(freq, id))
    }

    /// Peeks the eviction candidate: the tail of the lowest-frequency bucket.
    pub fn peek_min(&self) -> Option<&Entry<K, V>> {
        self.buckets.first_key_value().and_then(|(_, bucket)| bucket.back())
    }

    /// Removes and returns the eviction candidate.
    pub fn pop_min(&mut self) -> Option<Entry<K, V>> {
        let mut bucket_entry = self.buckets.first_entry()?;
        let entry = bucket_entry.get_mut().pop_back()?;
        if bucket_entry.get().is_empty() {
            bucket_entry.remove();
        }
        self.index.remove(&entry.key);
        Some(entry)
    }

    /// Lowers every frequency by `amount`, flooring at 1, and returns the new
    /// sum of all frequencies.
    ///
    /// Buckets that collapse onto the same frequency are merged so that
    /// entries which had the lower frequency sit closer to the eviction end.
    pub fn age_by(&mut self, amount: u64) -> u64 {
        let old = std::mem::take(&mut self.buckets);
        let mut total = 0u64;

        for (freq, mut bucket) in old.into_iter().rev() {
            let new_freq = freq.saturating_sub(amount).max(1);
            let target = self.buckets.entry(new_freq).or_default();
            while let Some(mut entry) = bucket.pop_front() {
                entry.counter = new_freq;
                total = total.saturating_add(new_freq);
                let id = target.push_back(entry);
                if let Some(key) = target.get(id).map(|entry| &entry.key)
                    && let Some(slot) = self.index.get_mut(key)
                {
                    *slot = (new_freq, id);
                }
            }
        }
        total
    }

    /// Sum of all frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.buckets
            .iter()
            .map(|(&freq, bucket)| freq.saturating_mul(bucket.len() as u64))
            .fold(0u64, u64::saturating_add)
    }

    /// Iterates entries from the lowest frequency up, each bucket from newest
    /// arrival to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.buckets.values().flat_map(|bucket| bucket.iter())
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
    }

    fn unlink(&mut self, freq: u64, id: SlotId) -> Entry<K, V> {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            panic!("frequency index points at missing bucket {freq}");
        };
        let entry = match bucket.take(id) {
            Ok(entry) => entry,
            Err(err) => panic!("frequency index out of sync: {err}"),
        };
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        entry
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut linked = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("empty bucket {freq} was kept")));
            }
            bucket.check_invariants()?;
            for entry in bucket.iter() {
                if entry.counter != freq {
                    return Err(InvariantError::new(format!(
                        "entry with counter {} linked into bucket {freq}",
                        entry.counter
                    )));
                }
                match self.index.get(&entry.key) {
                    Some(&(indexed, _)) if indexed == freq => {},
                    _ => {
                        return Err(InvariantError::new(format!(
                            "bucket {freq} holds an entry the index does not map to it"
                        )));
                    },
                }
            }
            linked += bucket.len();
        }
        if linked != self.index.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {linked} entries but index holds {}",
                self.index.len()
            )));
        }
        for &(freq, id) in self.index.values() {
            let live = self
                .buckets
                .get(&freq)
                .is_some_and(|bucket| bucket.contains(id));
            if !live {
                return Err(InvariantError::new(format!(
                    "index points at a dead slot in bucket {freq}"
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> Default for FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
