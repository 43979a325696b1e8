// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across all cache
// policies. These span multiple modules and belong here rather than in any
// single source file.

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::policy::arc::ArcCore;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::lru_k::LruKCache;
use evictkit::policy::sharded_lru::ShardedLruCache;
use evictkit::traits::{ConcurrentCache, CoreCache, LfuCacheTrait, MutableCache};

const POLICIES: [CachePolicy; 5] = [
    CachePolicy::Lru,
    CachePolicy::Lfu,
    CachePolicy::AgingLfu { max_average: 4 },
    CachePolicy::LruK { k: 2, history: 8 },
    CachePolicy::Arc,
];

// ==============================================
// Capacity-0 Behavior
// ==============================================
//
// Zero capacity is legal everywhere: inserts are accepted and dropped.

#[test]
fn capacity_zero_is_honored_by_every_policy() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(0).build::<&str, i32>(policy);
        assert_eq!(cache.capacity(), 0, "{}", policy.name());

        cache.insert("key", 42);
        cache.get(&"key");
        cache.insert("key", 43);
        assert_eq!(cache.len(), 0, "{} should reject inserts", policy.name());
        assert_eq!(cache.get(&"key"), None);
        assert_eq!(cache.remove(&"key"), None);
    }
}

#[test]
fn capacity_zero_sharded_lru_rejects_puts() {
    let cache = ShardedLruCache::new(0, 4);
    cache.put("key", 42);
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 0);
}

// ==============================================
// Removal and clearing
// ==============================================

#[test]
fn remove_is_idempotent_for_every_policy() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(8).build::<u32, u32>(policy);
        cache.insert(1, 10);
        cache.get(&1);
        assert_eq!(cache.remove(&1), Some(10), "{}", policy.name());
        assert_eq!(cache.remove(&1), None, "{}", policy.name());
        assert!(!cache.contains(&1));
    }
}

#[test]
fn clear_empties_every_policy_and_keeps_capacity() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(8).build::<u32, u32>(policy);
        for key in 0..20 {
            cache.insert(key, key);
            cache.get(&key);
        }
        cache.clear();
        assert!(cache.is_empty(), "{}", policy.name());
        assert_eq!(cache.capacity(), 8);
        cache.insert(1, 1);
        cache.get(&1);
        assert_eq!(cache.get(&1), Some(&1), "{}", policy.name());
    }
}

// ==============================================
// Structural invariants after mixed workloads
// ==============================================

fn workload() -> impl Iterator<Item = (u32, bool)> {
    // deterministic mix of hot and cold keys, every third op a read
    (0..500u32).map(|i| {
        let key = if i % 4 == 0 { i % 5 } else { (i * 7919) % 64 };
        (key, i % 3 == 0)
    })
}

#[test]
fn invariants_hold_after_mixed_workload() {
    let mut arc = ArcCore::new(16);
    let mut lru = LruCache::new(16);
    let mut lfu = LfuCache::with_aging(16, 3);
    let mut lru_k = LruKCache::with_k(16, 2, 16);

    for (key, read) in workload() {
        if read {
            arc.get(&key);
            lru.get(&key);
            lfu.get(&key);
            lru_k.get(&key);
        } else {
            arc.insert(key, key);
            lru.insert(key, key);
            lfu.insert(key, key);
            lru_k.insert(key, key);
        }
    }

    arc.check_invariants().unwrap();
    lru.check_invariants().unwrap();
    lfu.check_invariants().unwrap();
    lru_k.check_invariants().unwrap();
    assert!(lru.len() <= 16);
    assert!(lfu.len() <= 16);
    assert!(lru_k.len() <= 16);
}

#[test]
fn hits_return_the_last_written_value() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(8).build::<u32, u32>(policy);
        let mut written = std::collections::HashMap::new();
        for (step, (key, read)) in workload().enumerate() {
            if read {
                if let Some(&value) = cache.get(&key) {
                    assert_eq!(Some(&value), written.get(&key), "{}", policy.name());
                }
            } else {
                let value = step as u32;
                cache.insert(key, value);
                written.insert(key, value);
            }
        }
    }
}

// ==============================================
// Policy-specific ordering
// ==============================================

#[test]
fn lru_evicts_in_recency_order() {
    let mut cache = LruCache::new(3);
    for key in 1..=3 {
        cache.insert(key, key);
    }
    cache.get(&1);
    cache.insert(4, 4);
    cache.insert(5, 5);
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![5, 4, 1]);
}

#[test]
fn lfu_aging_lowers_hot_frequencies() {
    let mut plain = LfuCache::new(2);
    let mut aging = LfuCache::with_aging(2, 2);
    for cache in [&mut plain, &mut aging] {
        cache.insert("old", 0);
        for _ in 0..20 {
            cache.get(&"old");
        }
    }
    assert_eq!(plain.frequency(&"old"), Some(21));
    assert!(aging.frequency(&"old") < Some(21));
    aging.check_invariants().unwrap();
}

#[test]
fn lru_k_admits_only_after_k_touches() {
    let mut cache = LruKCache::with_k(4, 3, 8);
    cache.insert(7, "seven");
    cache.get(&7);
    assert!(!cache.contains(&7));
    cache.get(&7);
    assert!(cache.contains(&7));
    assert_eq!(cache.get(&7), Some(&"seven"));
}

#[test]
fn sharded_lru_routes_each_key_to_one_shard() {
    let cache = ShardedLruCache::with_seed(32, 4, 99);
    for key in 0..16u32 {
        cache.put(key, key);
        let shard = cache.shard_for(&key);
        assert!(shard < 4);
        assert_eq!(cache.shard_for(&key), shard);
    }
    cache.check_invariants().unwrap();
}
