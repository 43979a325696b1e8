//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`], so the
//! list never holds owning pointers in both directions and a node removal is an
//! index invalidation rather than a pointer-graph rewrite.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!            MRU                        LRU
//! ```
//!
//! ## Ownership checks
//!
//! Handles are tagged with the arena that issued them. [`IntrusiveList::take`]
//! reports a handle that does not belong to this list as an
//! [`InvariantError`]; [`IntrusiveList::remove`] reports it as `None`. Callers
//! that hold an index entry for the node treat either outcome as corruption.
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `pop_front` / `pop_back`: O(1)
//! - `remove` / `take` / `move_to_front`: O(1)
//! - `iter`: O(n)
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
/// Intrusive list that stores nodes in a `SlotArena` and links them via `SlotId`.
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front (most recent) of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the node id at the front of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value at the back (least recent) of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the node id at the back of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|head| self.arena.get_mut(head)) {
            Some(old_head) => old_head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Inserts a new node at the back and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(old_tail) => old_tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    ///
    /// Returns `None` when `id` is not a live node of this list.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id`, treating a foreign or stale handle as an error.
    pub fn take(&mut self, id: SlotId) -> Result<T, InvariantError> {
        self.remove(id).ok_or_else(|| {
            InvariantError::new(format!(
                "slot {}@{} is not a node of this list",
                id.index(),
                id.generation()
            ))
        })
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.head {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|prev_id| self.arena.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }

        match next.and_then(|next_id| self.arena.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }
        match old_head.and_then(|head| self.arena.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the links and checks them against the arena.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new(
                    "head/tail disagree about an empty list",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("link points at a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("prev link does not mirror next link"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("last node is not the tail"));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected"));
            }
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {count} nodes but arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }
}

pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn intrusive_list_push_and_pop() {
        let mut list = IntrusiveList::new();
        list.push_front(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));

        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn intrusive_list_remove_middle_relinks_neighbours() {
        let mut list = IntrusiveList::new();
        let _a = list.push_back('a');
        let b = list.push_back('b');
        let _c = list.push_back('c');

        assert_eq!(list.remove(b), Some('b'));
        assert_eq!(collect(&list), vec!['a', 'c']);
        list.check_invariants().unwrap();
    }

    #[test]
    fn intrusive_list_move_to_front() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let _b = list.push_back("b");
        let c = list.push_back("c");

        assert!(list.move_to_front(c));
        assert_eq!(collect(&list), vec!["c", "a", "b"]);
        assert!(list.move_to_front(c));
        assert_eq!(collect(&list), vec!["c", "a", "b"]);
        assert!(list.move_to_front(a));
        assert_eq!(list.back(), Some(&"b"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn intrusive_list_take_rejects_foreign_handle() {
        let mut left = IntrusiveList::new();
        let mut right = IntrusiveList::new();
        let foreign = left.push_front(1);
        right.push_front(2);

        let err = right.take(foreign).unwrap_err();
        assert!(err.message().contains("not a node of this list"));
        assert_eq!(right.len(), 1);
        assert_eq!(left.take(foreign), Ok(1));
    }

    #[test]
    fn intrusive_list_take_rejects_stale_handle() {
        let mut list = IntrusiveList::new();
        let id = list.push_front(1);
        assert_eq!(list.take(id), Ok(1));
        let _reused = list.push_front(2);
        assert!(list.take(id).is_err());
        assert!(!list.move_to_front(id));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn intrusive_list_clear_resets_links() {
        let mut list = IntrusiveList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.check_invariants().unwrap();
    }
}
