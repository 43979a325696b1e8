//! Eviction policies.
//!
//! | Policy                       | Victim                                   |
//! |------------------------------|------------------------------------------|
//! | [`arc::ArcCore`]             | adaptive: recency tail or lowest frequency |
//! | [`lru::LruCache`]            | least recently used                      |
//! | [`lfu::LfuCache`]            | lowest frequency, optional aging         |
//! | [`lru_k::LruKCache`]         | LRU over keys touched at least `k` times |
//! | [`sharded_lru::ShardedLruCache`] | LRU within the key's shard           |

pub mod arc;
pub mod lfu;
pub mod lru;
pub mod lru_k;
pub mod sharded_lru;
