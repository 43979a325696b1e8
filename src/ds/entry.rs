//! The unit every resident container stores.

/// A resident key/value pair plus its access counter.
///
/// The counter starts at 1. Recency containers use it as an access count;
/// frequency containers use it as the entry's frequency and keep it equal to
/// the bucket the entry is linked into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub counter: u64,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            counter: 1,
        }
    }

    /// Bumps the counter, saturating at `u64::MAX`, and returns the new count.
    #[inline]
    pub fn bump(&mut self) -> u64 {
        self.counter = self.counter.saturating_add(1);
        self.counter
    }

    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_starts_at_one_and_saturates() {
        let mut entry = Entry::new("k", 0);
        assert_eq!(entry.counter, 1);
        assert_eq!(entry.bump(), 2);

        entry.counter = u64::MAX;
        assert_eq!(entry.bump(), u64::MAX);
        assert_eq!(entry.into_pair(), ("k", 0));
    }
}
