//! Key-to-shard routing for the sharded policies.
//!
//! A key is hashed together with the selector's seed and the 64-bit hash is
//! mapped onto `[0, shards)` with a multiply-shift range reduction, which uses
//! the high bits of the hash rather than the low bits a modulo would.
//!
//! ```text
//!   key ──► FxHasher(seed, key) ──► h: u64 ──► (h * shards) >> 64 ──► shard
//! ```
//!
//! ```
//! use evictkit::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 7);
//! let shard = selector.shard_for_key(&"user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"user:123"), shard);
//! ```
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Deterministic seeded mapping from keys to shard indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector over `shards` shards. Zero is clamped to one.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Maps `key` to a shard in `[0, shard_count())`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        let hash = hasher.finish();
        ((u128::from(hash) * self.shards as u128) >> 64) as usize
    }

    /// Per-shard capacity such that the shards together hold at least `total`.
    pub fn shard_capacity(&self, total: usize) -> usize {
        total.div_ceil(self.shards)
    }
}

impl Default for ShardSelector {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
