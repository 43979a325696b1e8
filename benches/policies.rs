use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::policy::sharded_lru::ShardedLruCache;
use evictkit::traits::{ConcurrentCache, CoreCache};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 1024;

const POLICIES: [CachePolicy; 5] = [
    CachePolicy::Lru,
    CachePolicy::Lfu,
    CachePolicy::AgingLfu { max_average: 10 },
    CachePolicy::LruK {
        k: 2,
        history: CAPACITY,
    },
    CachePolicy::Arc,
];

/// 90% of keys from a hot quarter of the capacity, the rest from a wide range.
fn hotset_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.random_bool(0.9) {
                rng.random_range(0..(CAPACITY as u64 / 4))
            } else {
                rng.random_range(0..(CAPACITY as u64 * 16))
            }
        })
        .collect()
}

fn bench_read_through(c: &mut Criterion) {
    let keys = hotset_keys(8192, 42);
    let mut group = c.benchmark_group("read_through_hotset");
    for policy in POLICIES {
        group.bench_with_input(BenchmarkId::from_parameter(policy.name()), &keys, |b, keys| {
            b.iter_batched(
                || CacheBuilder::new(CAPACITY).build::<u64, u64>(policy),
                |mut cache| {
                    for &key in keys {
                        if cache.get(&key).is_none() {
                            cache.insert(key, key);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_insert_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_churn");
    for policy in POLICIES {
        group.bench_function(policy.name(), |b| {
            b.iter_batched(
                || CacheBuilder::new(CAPACITY).build::<u64, u64>(policy),
                |mut cache| {
                    for i in 0..4 * CAPACITY as u64 {
                        cache.insert(std::hint::black_box(i), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_sharded_lru(c: &mut Criterion) {
    let keys = hotset_keys(8192, 7);
    let mut group = c.benchmark_group("sharded_lru_read_through");
    for shards in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(shards), &keys, |b, keys| {
            b.iter_batched(
                || ShardedLruCache::new(CAPACITY, shards),
                |cache| {
                    for &key in keys {
                        if cache.get(&key).is_none() {
                            cache.put(key, key);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read_through, bench_insert_churn, bench_sharded_lru);
criterion_main!(benches);
