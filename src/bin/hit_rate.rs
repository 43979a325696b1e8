//! Hit-rate comparison across every policy in evictkit.
//!
//! Run with: cargo run --bin hit_rate --release --features harness -- --capacity 100
//!
//! Each scenario warms the cache with puts, then replays a stream of reads.
//! A read that misses is followed by a put of the same key (read-through).

use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::error::ConfigError;
use evictkit::policy::sharded_lru::ShardedLruCache;
use evictkit::traits::{ConcurrentCache, CoreCache};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare hit ratios of the evictkit policies")]
struct Args {
    /// Total capacity of every cache under test
    #[arg(short, long, default_value = "100")]
    capacity: usize,

    /// Read operations per scenario
    #[arg(short, long, default_value = "10000")]
    operations: usize,

    /// Seed for the key generator
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Shards for the sharded LRU
    #[arg(long, default_value = "4")]
    shards: usize,

    /// Scenarios to run (all when omitted)
    #[arg(long, value_enum)]
    scenario: Vec<Scenario>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    HotData,
    LoopScan,
    WorkloadShift,
}

impl Scenario {
    const ALL: [Scenario; 3] = [Scenario::HotData, Scenario::LoopScan, Scenario::WorkloadShift];

    fn name(self) -> &'static str {
        match self {
            Scenario::HotData => "hot-data",
            Scenario::LoopScan => "loop-scan",
            Scenario::WorkloadShift => "workload-shift",
        }
    }
}

/// A cache under test, single-threaded or sharded.
enum Subject {
    Single(Cache<u64, String>),
    Sharded(ShardedLruCache<u64, String>),
}

impl Subject {
    fn name(&self) -> &'static str {
        match self {
            Subject::Single(cache) => cache.policy().name(),
            Subject::Sharded(_) => "sharded-lru",
        }
    }

    fn put(&mut self, key: u64) {
        let value = format!("value{key}");
        match self {
            Subject::Single(cache) => {
                cache.insert(key, value);
            },
            Subject::Sharded(cache) => cache.put(key, value),
        }
    }

    /// Reads `key`, inserting it on a miss. Returns whether it was a hit.
    fn read_through(&mut self, key: u64) -> bool {
        let hit = match self {
            Subject::Single(cache) => cache.get(&key).is_some(),
            Subject::Sharded(cache) => cache.get(&key).is_some(),
        };
        if !hit {
            self.put(key);
        }
        hit
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    reads: u64,
    hits: u64,
}

impl Tally {
    fn record(&mut self, hit: bool) {
        self.reads += 1;
        self.hits += u64::from(hit);
    }

    fn ratio(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            100.0 * self.hits as f64 / self.reads as f64
        }
    }
}

fn subjects(args: &Args) -> Result<Vec<Subject>, ConfigError> {
    let builder = CacheBuilder::new(args.capacity);
    let policies = [
        CachePolicy::Lru,
        CachePolicy::LruK {
            k: 2,
            history: args.capacity,
        },
        CachePolicy::Lfu,
        CachePolicy::AgingLfu { max_average: 10 },
        CachePolicy::Arc,
    ];
    let mut subjects = policies
        .into_iter()
        .map(|policy| builder.try_build(policy).map(Subject::Single))
        .collect::<Result<Vec<_>, _>>()?;
    subjects.push(Subject::Sharded(ShardedLruCache::try_with_seed(
        args.capacity,
        args.shards,
        args.seed,
    )?));
    Ok(subjects)
}

/// 40% of reads go to 3 hot keys, the rest to 500 cold keys.
fn hot_data(subject: &mut Subject, rng: &mut SmallRng, operations: usize) -> Tally {
    const HOT_KEYS: u64 = 3;
    const COLD_KEYS: u64 = 500;
    let next_key = |op: usize, rng: &mut SmallRng| {
        if op % 100 < 40 {
            rng.random_range(0..HOT_KEYS)
        } else {
            HOT_KEYS + rng.random_range(0..COLD_KEYS)
        }
    };

    for op in 0..operations {
        let key = next_key(op, rng);
        subject.put(key);
    }
    let mut tally = Tally::default();
    for op in 0..operations / 2 {
        let key = next_key(op, rng);
        tally.record(subject.read_through(key));
    }
    tally
}

/// 70% sequential sweep over a 200-key loop, 15% random jumps inside it,
/// 15% reads just outside it.
fn loop_scan(subject: &mut Subject, rng: &mut SmallRng, operations: usize) -> Tally {
    const LOOP_SIZE: u64 = 200;
    for key in 0..LOOP_SIZE * 2 {
        subject.put(key);
    }

    let mut tally = Tally::default();
    let mut position = 0;
    for op in 0..operations {
        let key = match op % 100 {
            0..70 => {
                let key = position;
                position = (position + 1) % LOOP_SIZE;
                key
            },
            70..85 => rng.random_range(0..LOOP_SIZE),
            _ => LOOP_SIZE + rng.random_range(0..LOOP_SIZE),
        };
        tally.record(subject.read_through(key));
    }
    tally
}

/// Five phases: hot set, wide random, sequential, moving locality, mixed.
fn workload_shift(subject: &mut Subject, rng: &mut SmallRng, operations: usize) -> Tally {
    let phase = (operations / 5).max(1);
    for key in 0..1000 {
        subject.put(key);
    }

    let mut tally = Tally::default();
    for op in 0..operations {
        let key = match op / phase {
            0 => rng.random_range(0..5),
            1 => rng.random_range(0..1000),
            2 => ((op - phase * 2) % 100) as u64,
            3 => {
                let locality = ((op / 1000) % 10) as u64;
                locality * 20 + rng.random_range(0..20)
            },
            _ => match rng.random_range(0..100) {
                0..30 => rng.random_range(0..5),
                30..60 => 5 + rng.random_range(0..95),
                _ => 100 + rng.random_range(0..900),
            },
        };
        tally.record(subject.read_through(key));
    }
    tally
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let scenarios = if args.scenario.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        args.scenario.clone()
    };
    info!(capacity = args.capacity, operations = args.operations, seed = args.seed, "starting");

    for scenario in scenarios {
        println!("\n=== {} (capacity {}) ===", scenario.name(), args.capacity);
        for mut subject in subjects(&args)? {
            let mut rng = SmallRng::seed_from_u64(args.seed);
            let tally = match scenario {
                Scenario::HotData => hot_data(&mut subject, &mut rng, args.operations),
                Scenario::LoopScan => loop_scan(&mut subject, &mut rng, args.operations),
                Scenario::WorkloadShift => workload_shift(&mut subject, &mut rng, args.operations),
            };
            println!(
                "{:<12} hit ratio {:>6.2}%  ({} / {})",
                subject.name(),
                tally.ratio(),
                tally.hits,
                tally.reads
            );
        }
    }
    Ok(())
}
