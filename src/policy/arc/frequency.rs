//! Frequency partition of the ARC engine (T2 residents + B2 ghosts).
//!
//! Residents live in [`FrequencyBuckets`]; the victim is the earliest arrival
//! in the lowest frequency bucket. Victims leave a key-only marker in the
//! ghost list, which is bounded by the same capacity as the residents.
use std::hash::Hash;

use tracing::trace;

use super::PutOutcome;
use crate::ds::{Entry, FrequencyBuckets, GhostList};
use crate::error::InvariantError;

/// Frequency-bucketed resident entries plus the ghost list they evict into.
#[derive(Debug)]
pub struct FrequencyStore<K, V> {
    resident: FrequencyBuckets<K, V>,
    ghosts: GhostList<K>,
    capacity: usize,
}

impl<K, V> FrequencyStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            resident: FrequencyBuckets::with_capacity(capacity),
            ghosts: GhostList::new(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    pub fn ghost_len(&self) -> usize {
        self.ghosts.len()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.resident.contains(key)
    }

    #[inline]
    pub fn contains_ghost(&self, key: &K) -> bool {
        self.ghosts.contains(key)
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.resident.frequency(key)
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        self.resident.get(key)
    }

    /// Raises the frequency of `key` and returns its value.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.resident.touch(key)?;
        self.resident.get(key)
    }

    /// Updates and touches a resident entry, or inserts a new one at
    /// frequency 1 after evicting while the store is at or over capacity.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<V> {
        if self.resident.contains(&key) {
            self.resident.touch(&key);
            return match self.resident.insert(key, value) {
                Some(previous) => PutOutcome::Updated(previous),
                None => PutOutcome::Inserted { evicted: 0 },
            };
        }

        self.ghosts.take(&key);

        let mut evicted = 0;
        while self.resident.len() >= self.capacity && self.evict_min() {
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, capacity = self.capacity, "frequency store evicted into ghost list");
        }

        if self.capacity == 0 {
            return PutOutcome::Rejected { evicted };
        }
        self.resident.insert(key, value);
        PutOutcome::Inserted { evicted }
    }

    pub fn take(&mut self, key: &K) -> Option<Entry<K, V>> {
        self.resident.remove(key)
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.resident.remove(key).is_some()
    }

    pub fn check_ghost(&mut self, key: &K) -> bool {
        self.ghosts.take(key)
    }

    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.ghosts.set_capacity(self.capacity);
    }

    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        self.capacity -= 1;
        self.ghosts.set_capacity(self.capacity);
        true
    }

    pub fn reset(&mut self, capacity: usize) {
        self.resident.clear();
        self.ghosts.clear();
        self.capacity = capacity;
        self.ghosts.set_capacity(capacity);
    }

    /// Resident keys from the lowest frequency up.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.resident.iter().map(|entry| &entry.key)
    }

    pub fn ghost_keys(&self) -> impl Iterator<Item = &K> {
        self.ghosts.iter()
    }

    fn evict_min(&mut self) -> bool {
        match self.resident.pop_min() {
            Some(entry) => {
                self.ghosts.record(entry.key);
                true
            },
            None => false,
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.resident.check_invariants()?;
        self.ghosts.check_invariants()?;
        if self.resident.iter().any(|entry| self.ghosts.contains(&entry.key)) {
            return Err(InvariantError::new("key is both resident and a frequency ghost"));
        }
        if self.ghosts.capacity() != self.capacity {
            return Err(InvariantError::new(format!(
                "frequency ghost capacity {} differs from store capacity {}",
                self.ghosts.capacity(),
                self.capacity
            )));
        }
        Ok(())
    }
}
