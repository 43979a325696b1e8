//! Recency partition of the ARC engine (T1 residents + B1 ghosts).
//!
//! ```text
//!   resident (IntrusiveList<Entry>)             ghosts (GhostList<K>)
//!   head ─► [e] ◄──► [d] ◄──► [c] ◄── tail ──evict──► head ─► [b] ◄──► [a]
//!           MRU                  LRU                          newest   oldest
//!
//!   capacity bounds both lists; the ghost list is trimmed as soon as it
//!   shrinks, residents over capacity go on the next put of a new key
//! ```
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::PutOutcome;
use crate::ds::{Entry, GhostList, IntrusiveList, SlotId};
use crate::error::InvariantError;

/// Bounded recency list of resident entries plus the ghost list it evicts into.
#[derive(Debug)]
pub struct RecencyStore<K, V> {
    resident: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    ghosts: GhostList<K>,
    capacity: usize,
}

impl<K, V> RecencyStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            resident: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
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
        self.index.contains_key(key)
    }

    #[inline]
    pub fn contains_ghost(&self, key: &K) -> bool {
        self.ghosts.contains(key)
    }

    /// Access count of a resident key.
    pub fn counter(&self, key: &K) -> Option<u64> {
        let &id = self.index.get(key)?;
        self.resident.get(id).map(|entry| entry.counter)
    }

    /// Returns the value without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.resident.get(id).map(|entry| &entry.value)
    }

    /// Counts an access and moves the entry to the head.
    ///
    /// A `Some` here is what the engine treats as the promotion signal.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.resident.move_to_front(id);
        let entry = self.entry_mut(id);
        entry.bump();
        Some(&entry.value)
    }

    /// Updates a resident entry in place, or links a new one at the head after
    /// evicting from the tail while the store is at or over capacity.
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<V> {
        if let Some(&id) = self.index.get(&key) {
            self.resident.move_to_front(id);
            let entry = self.entry_mut(id);
            entry.bump();
            return PutOutcome::Updated(std::mem::replace(&mut entry.value, value));
        }

        // a resurrected key must not stay a ghost while it is resident
        self.ghosts.take(&key);

        let mut evicted = 0;
        while self.resident.len() >= self.capacity && self.evict_tail() {
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, capacity = self.capacity, "recency store evicted into ghost list");
        }

        if self.capacity == 0 {
            return PutOutcome::Rejected { evicted };
        }
        let id = self.resident.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, id);
        PutOutcome::Inserted { evicted }
    }

    /// Unlinks a resident entry without recording a ghost.
    pub fn take(&mut self, key: &K) -> Option<Entry<K, V>> {
        let id = self.index.remove(key)?;
        match self.resident.take(id) {
            Ok(entry) => Some(entry),
            Err(err) => panic!("recency index out of sync: {err}"),
        }
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Consumes the ghost marker for `key`, if any.
    pub fn check_ghost(&mut self, key: &K) -> bool {
        self.ghosts.take(key)
    }

    pub fn increase_capacity(&mut self) {
        self.capacity += 1;
        self.ghosts.set_capacity(self.capacity);
    }

    /// Releases one unit of capacity; `false` when already at zero.
    pub fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        self.capacity -= 1;
        self.ghosts.set_capacity(self.capacity);
        true
    }

    /// Drops residents and ghosts and sets a new capacity.
    pub fn reset(&mut self, capacity: usize) {
        self.resident.clear();
        self.index.clear();
        self.ghosts.clear();
        self.capacity = capacity;
        self.ghosts.set_capacity(capacity);
    }

    /// Resident keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.resident.iter().map(|entry| &entry.key)
    }

    pub fn ghost_keys(&self) -> impl Iterator<Item = &K> {
        self.ghosts.iter()
    }

    fn evict_tail(&mut self) -> bool {
        let Some(entry) = self.resident.pop_back() else {
            return false;
        };
        self.index.remove(&entry.key);
        self.ghosts.record(entry.key);
        true
    }

    fn entry_mut(&mut self, id: SlotId) -> &mut Entry<K, V> {
        match self.resident.get_mut(id) {
            Some(entry) => entry,
            None => panic!(
                "recency index points at dead slot {}@{}",
                id.index(),
                id.generation()
            ),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.resident.check_invariants()?;
        self.ghosts.check_invariants()?;
        if self.resident.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "recency index holds {} keys but list holds {}",
                self.index.len(),
                self.resident.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.resident.get(id) {
                Some(entry) if entry.key == *key => {},
                _ => return Err(InvariantError::new("recency index entry does not match its slot")),
            }
            if self.ghosts.contains(key) {
                return Err(InvariantError::new("key is both resident and a recency ghost"));
            }
        }
        if self.ghosts.capacity() != self.capacity {
            return Err(InvariantError::new(format!(
                "recency ghost capacity {} differs from store capacity {}",
                self.ghosts.capacity(),
                self.capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(store: &RecencyStore<&'static str, i32>) -> Vec<&'static str> {
        store.keys().copied().collect()
    }

    #[test]
    fn recency_store_evicts_tail_into_ghosts() {
        let mut store = RecencyStore::new(2);
        assert_eq!(store.put("a", 1), PutOutcome::Inserted { evicted: 0 });
        store.put("b", 2);
        assert_eq!(store.put("c", 3), PutOutcome::Inserted { evicted: 1 });

        assert_eq!(keys(&store), vec!["c", "b"]);
        assert!(store.contains_ghost(&"a"));
        assert!(!store.contains(&"a"));
        store.check_invariants().unwrap();
    }

    #[test]
    fn recency_store_get_counts_and_refreshes() {
        let mut store = RecencyStore::new(2);
        store.put("a", 1);
        store.put("b", 2);
        assert_eq!(store.get(&"a"), Some(&1));
        assert_eq!(store.counter(&"a"), Some(2));

        store.put("c", 3);
        assert!(store.contains(&"a"));
        assert!(store.contains_ghost(&"b"));
    }

    #[test]
    fn recency_store_put_existing_replaces_value() {
        let mut store = RecencyStore::new(2);
        store.put("a", 1);
        assert_eq!(store.put("a", 10), PutOutcome::Updated(1));
        assert_eq!(store.peek(&"a"), Some(&10));
        assert_eq!(store.counter(&"a"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn recency_store_check_ghost_is_one_shot() {
        let mut store = RecencyStore::new(1);
        store.put("a", 1);
        store.put("b", 2);
        assert!(store.check_ghost(&"a"));
        assert!(!store.check_ghost(&"a"));
        assert!(!store.check_ghost(&"b"));
    }

    #[test]
    fn recency_store_shrink_trims_ghosts_now_and_residents_later() {
        let mut store = RecencyStore::new(3);
        for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
            store.put(key, value);
        }
        assert_eq!(store.ghost_len(), 2);

        assert!(store.decrease_capacity());
        assert!(store.decrease_capacity());
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.ghost_len(), 1);
        assert_eq!(store.len(), 3);
        store.check_invariants().unwrap();

        assert_eq!(store.put("f", 6), PutOutcome::Inserted { evicted: 3 });
        assert_eq!(keys(&store), vec!["f"]);
        assert_eq!(store.ghost_len(), 1);
        store.check_invariants().unwrap();
    }

    #[test]
    fn recency_store_decrease_floors_at_zero() {
        let mut store: RecencyStore<&str, i32> = RecencyStore::new(1);
        assert!(store.decrease_capacity());
        assert!(!store.decrease_capacity());
        assert_eq!(store.capacity(), 0);
        store.increase_capacity();
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn recency_store_zero_capacity_rejects() {
        let mut store = RecencyStore::new(0);
        assert_eq!(store.put("a", 1), PutOutcome::Rejected { evicted: 0 });
        assert!(store.is_empty());
        assert_eq!(store.get(&"a"), None);
        assert_eq!(store.ghost_len(), 0);
    }

    #[test]
    fn recency_store_remove_leaves_no_ghost() {
        let mut store = RecencyStore::new(2);
        store.put("a", 1);
        assert!(store.remove(&"a"));
        assert!(!store.remove(&"a"));
        assert!(!store.contains_ghost(&"a"));
        store.check_invariants().unwrap();
    }
}
