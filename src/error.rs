//! Error types shared by every policy in the crate.
//!
//! - [`InvariantError`]: a structural check failed. Returned by every
//!   `check_invariants` method and by [`IntrusiveList::take`] when a handle
//!   does not belong to the list it is presented to. Stores that hit one
//!   during a normal operation treat it as corruption and panic with its
//!   message.
//! - [`ConfigError`]: a constructor parameter is out of range (zero shards,
//!   `k == 0`, a zero aging threshold). Returned by the `try_*` constructors;
//!   the infallible constructors panic with the same message.
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru_k::LruKCache;
//!
//! let cache: Result<LruKCache<u64, &str>, ConfigError> = LruKCache::try_new(8, 2, 8);
//! assert!(cache.is_ok());
//!
//! let bad = LruKCache::<u64, &str>::try_new(8, 0, 8);
//! assert!(bad.unwrap_err().message().contains("k"));
//! ```
//!
//! [`IntrusiveList::take`]: crate::ds::IntrusiveList::take

use std::fmt;

/// A structural invariant does not hold.
///
/// Carries a description of the check that failed, for example
/// `"recency index holds 3 keys but list holds 2"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

/// A cache was configured with parameters it cannot honor.
///
/// ```
/// use evictkit::policy::sharded_lru::ShardedLruCache;
///
/// let err = ShardedLruCache::<u64, u64>::try_new(64, 0).unwrap_err();
/// assert!(err.to_string().contains("shard"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
