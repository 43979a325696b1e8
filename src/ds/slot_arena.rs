//! Generational slot storage backing every intrusive list in the crate.
//!
//! Each arena draws a unique tag at construction and every [`SlotId`] it hands
//! out carries that tag plus the slot's generation. Lookups check both, so a
//! handle minted by another arena, or one whose slot has since been freed and
//! reused, resolves to `None` instead of aliasing an unrelated value.
//!
//! ```text
//!   slots: Vec<Slot<T>>                        free_list: Vec<u32>
//!   ┌───────┬─────────────────────────────┐    ┌─────┐
//!   │ index │ Slot { generation, value }  │    │  1  │ ◄── next insert reuses
//!   ├───────┼─────────────────────────────┤    └─────┘     index 1 with gen 3
//!   │   0   │ { gen: 0, Some(A) }         │
//!   │   1   │ { gen: 2, None }            │
//!   │   2   │ { gen: 0, Some(C) }         │
//!   └───────┴─────────────────────────────┘
//!
//!   SlotId { tag: 7, index: 1, generation: 2 }  → stale after reuse
//! ```
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ARENA_TAG: AtomicU32 = AtomicU32::new(1);

/// Handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    tag: u32,
    index: u32,
    generation: u32,
}

impl SlotId {
    /// Position of the slot inside its arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot at the time this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Vector-backed arena with free-list reuse and generation-checked handles.
#[derive(Debug)]
pub struct SlotArena<T> {
    tag: u32,
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: NEXT_ARENA_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let index = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.value = Some(value);
                index
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                (self.slots.len() - 1) as u32
            },
        };
        self.len += 1;
        SlotId {
            tag: self.tag,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slot_mut(id)?;
        let value = slot.value.take()?;
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        if id.tag != self.tag {
            return None;
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slot_mut(id).and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.value = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(index as u32);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        let tag = self.tag;
        self.slots.iter().enumerate().filter_map(move |(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        tag,
                        index: index as u32,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot<T>> {
        if id.tag != self.tag {
            return None;
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
