#![no_main]

use evictkit::ds::FrequencyBuckets;
use libfuzzer_sys::fuzz_target;

// Insert/touch/remove/pop_min/age_by sequences over a small key space.
fuzz_target!(|data: &[u8]| {
    let mut buckets: FrequencyBuckets<u8, u32> = FrequencyBuckets::new();

    for pair in data.chunks_exact(2) {
        let (op, key) = (pair[0] % 6, pair[1] % 32);
        match op {
            0 => {
                let resident = buckets.contains(&key);
                assert_eq!(buckets.insert(key, u32::from(key)).is_some(), resident);
            },
            1 => {
                let before = buckets.frequency(&key);
                let after = buckets.touch(&key);
                assert_eq!(after, before.map(|f| f.saturating_add(1)));
            },
            2 => {
                let resident = buckets.contains(&key);
                assert_eq!(buckets.remove(&key).is_some(), resident);
            },
            3 => {
                let min = buckets.min_freq();
                let victim = buckets.pop_min();
                assert_eq!(victim.map(|entry| entry.counter), min);
            },
            4 => {
                let total = buckets.age_by(u64::from(key % 4));
                assert_eq!(total, buckets.total_frequency());
                assert!(buckets.iter().all(|entry| entry.counter >= 1));
            },
            _ => {
                let _ = buckets.peek_min();
            },
        }
        assert!(buckets.check_invariants().is_ok());
    }
});
