#![no_main]

use evictkit::policy::arc::ArcCore;
use evictkit::traits::{CoreCache, MutableCache};
use libfuzzer_sys::fuzz_target;

// Random get/insert/remove/clear traffic against a small ARC engine.
fuzz_target!(|data: &[u8]| {
    let Some((&capacity, ops)) = data.split_first() else {
        return;
    };
    let mut cache: ArcCore<u8, u32> = ArcCore::new(usize::from(capacity % 16));
    let total = cache.capacity();

    for pair in ops.chunks_exact(2) {
        let (op, key) = (pair[0] % 8, pair[1] % 48);
        match op {
            0..=3 => {
                cache.insert(key, u32::from(pair[0]));
            },
            4..=5 => {
                if cache.get(&key).is_some() {
                    assert!(cache.contains(&key));
                }
            },
            6 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            },
            _ if key == 0 => cache.clear(),
            _ => {},
        }
        assert!(cache.check_invariants().is_ok());
        assert_eq!(cache.recency_capacity() + cache.frequency_capacity(), total);
        assert!(cache.recency_ghost_len() <= cache.recency_capacity());
        assert!(cache.frequency_ghost_len() <= cache.frequency_capacity());
        assert!(total == 0 || cache.recency_capacity() >= 1);
    }
});
