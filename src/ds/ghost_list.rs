//! Bounded recency list of evicted keys.
//!
//! Adaptive policies record keys here when they evict them, without keeping
//! the value, and consult the list to detect a key coming back shortly after
//! it was dropped. Implemented as an `IntrusiveList` plus an index.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        list: IntrusiveList<K>
//!   ┌─────────┬─────────┐              head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   │  key A  │  id_1   │                 newest                   oldest
//!   │  key B  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Behavior
//! - `record(k)`: moves key to the head, drops the oldest marker if full
//! - `take(k)`: consumes a marker (one-shot ghost hit)
//! - `set_capacity(n)`: resizes the window; shrinking drops oldest markers
//!   right away so `len() <= capacity()` always holds
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

#[derive(Debug)]
/// Bounded recency list of keys (no values), used for ARC-style ghost tracking.
pub struct GhostList<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new ghost list with a maximum of `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as the newest marker, dropping the oldest if needed.
    pub fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return;
        }

        while self.list.len() >= self.capacity {
            if !self.drop_oldest() {
                break;
            }
        }

        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
    }

    /// Removes `key`; returns `true` if a marker was consumed.
    pub fn take(&mut self, key: &K) -> bool {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        if let Err(err) = self.list.take(id) {
            panic!("ghost list index out of sync: {err}");
        }
        true
    }

    /// Changes the window size, trimming the oldest markers when shrinking.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.list.len() > self.capacity {
            if !self.drop_oldest() {
                break;
            }
        }
    }

    /// Returns the oldest marker, the next one to be dropped.
    pub fn oldest(&self) -> Option<&K> {
        self.list.back()
    }

    /// Iterates markers from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    fn drop_oldest(&mut self) -> bool {
        match self.list.pop_back() {
            Some(old_key) => {
                self.index.remove(&old_key);
                true
            },
            None => false,
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "ghost list holds {} markers but index holds {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "ghost list length {} exceeds capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for &id in self.index.values() {
            if !self.list.contains(id) {
                return Err(InvariantError::new("ghost index points at a dead slot"));
            }
        }
        Ok(())
    }
}
