//! Least Recently Used (LRU) cache.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!        │
//!        ▼
//!   IntrusiveList<Entry<K, V>>
//!   head ──► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!    (MRU)                                    (LRU, evicted first)
//! ```
//!
//! Every operation is O(1). A capacity of zero gives a cache that accepts and
//! drops every insert.
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{Entry, IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[derive(Debug)]
pub struct LruCache<K, V> {
    list: IntrusiveList<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    /// Returns the value without refreshing its position.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Mutable access that also refreshes the entry's position.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let &id = self.index.get(key)?;
        self.list.move_to_front(id);
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Inserts and returns the entry evicted to make room, if any.
    ///
    /// Updating a resident key never evicts.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            return None;
        }
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.list.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };
        let id = self.list.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, id);
        evicted
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "lru index holds {} keys but list holds {}",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lru holds {} entries over capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                _ => return Err(InvariantError::new("lru index entry does not match its slot")),
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }
        if self.push(key, value).is_some() {
            trace!(capacity = self.capacity, "lru evicted tail");
        }
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let &id = self.index.get(key)?;
        self.list.move_to_front(id);
        let entry = self.list.get_mut(id)?;
        entry.bump();
        Some(&entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        match self.list.take(id) {
            Ok(entry) => Some(entry.value),
            Err(err) => panic!("lru index out of sync: {err}"),
        }
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some(entry.into_pair())
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut cache = LruCache::new(3);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");
        cache.get(&1);
        cache.insert(4, "four");

        assert!(!cache.contains(&2));
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![4, 1, 3]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_insert_existing_returns_previous_and_refreshes() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.insert("a", 10), Some(1));
        cache.insert("c", 3);
        assert_eq!(cache.peek(&"a"), Some(&10));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn lru_push_reports_victim() {
        let mut cache = LruCache::new(1);
        assert_eq!(cache.push("a", 1), None);
        assert_eq!(cache.push("a", 2), None);
        assert_eq!(cache.push("b", 3), Some(("a", 2)));
    }

    #[test]
    fn lru_pop_peek_touch() {
        let mut cache = LruCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.peek_lru(), Some((&"a", &1)));
        assert!(cache.touch(&"a"));
        assert!(!cache.touch(&"missing"));
        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_get_mut_refreshes() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        if let Some(value) = cache.get_mut(&"a") {
            *value += 10;
        }
        cache.insert("c", 3);
        assert_eq!(cache.peek(&"a"), Some(&11));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn lru_zero_capacity_drops_inserts() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.insert(1, 1), None);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn lru_remove_and_clear() {
        let mut cache = LruCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.remove(&1), Some(1));
        assert_eq!(cache.remove(&1), None);
        cache.clear();
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }
}
