//! evictkit: an adaptive replacement cache and companion eviction policies.
//!
//! The centre of the crate is [`policy::arc::ArcCore`], which splits a fixed
//! capacity between a recency partition and a frequency partition and moves
//! capacity between them on ghost hits. [`policy::arc::ConcurrentArcCache`] is
//! its thread-safe face. LRU, LFU (with optional aging), LRU-K and a sharded
//! LRU share the same traits and the same arena-backed list substrate.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = ArcCore::new(64);
//! cache.insert(1u64, "one");
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert!(cache.check_invariants().is_ok());
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::ds::{Entry, FrequencyBuckets, GhostList, IntrusiveList, ShardSelector, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ArcMetricsSnapshot;
