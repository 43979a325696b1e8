pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::arc::{ArcCore, ConcurrentArcCache, Residency};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::lru_k::LruKCache;
pub use crate::policy::sharded_lru::ShardedLruCache;
pub use crate::traits::{
    ConcurrentCache, CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache,
};
