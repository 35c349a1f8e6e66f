use chronoid::{
    CombGenerator, DbEngine, Epoch, IdStatus, RandomTokenGenerator, SecurityTokenGenerator,
    SnowflakeGenerator, SteadyClock, SystemClock, ThreadEntropy, TokenSigner, WallClock,
};
use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

/// A clock pinned to one reading.
struct FixedClock {
    millis: u64,
}

impl WallClock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.millis
    }
}

/// XORs the payload into an 8-byte tag; stands in for a real MAC.
struct TagSigner;

impl TokenSigner for TagSigner {
    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut tag = [0u8; 8];
        for (index, byte) in payload.iter().enumerate() {
            tag[index % tag.len()] ^= byte;
        }
        tag.to_vec()
    }
}

// IDs generated per benchmark iteration (split across threads in the
// contended variants). Matches the default sequence capacity, so a pinned
// clock never reports `Pending`.
const TOTAL_IDS: usize = 4096;

const TOKEN_LEN: usize = 32;

fn pinned_clock() -> FixedClock {
    FixedClock {
        millis: Epoch::DEFAULT.unix_millis(),
    }
}

/// Benchmarks the non-blocking hot path where every poll is `Ready`.
fn bench_snowflake_poll<C>(
    c: &mut Criterion,
    group_name: &str,
    factory: impl Fn() -> SnowflakeGenerator<C>,
) where
    C: WallClock,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = factory();
                for _ in 0..TOTAL_IDS {
                    match generator.poll().unwrap() {
                        IdStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdStatus::Pending { .. } => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks the blocking facade against a live clock (waits out drained
/// ticks).
fn bench_snowflake_generate<C>(
    c: &mut Criterion,
    group_name: &str,
    factory: impl Fn() -> SnowflakeGenerator<C>,
) where
    C: WallClock,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared across threads.
fn bench_snowflake_contended<C>(
    c: &mut Criterion,
    group_name: &str,
    factory: impl Fn() -> SnowflakeGenerator<C>,
) where
    C: WallClock + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{}/threads/{}", TOTAL_IDS, thread_count),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = Arc::new(factory());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        black_box(generator.generate().unwrap());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

/// Single-threaded poll with a pinned clock.
fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_snowflake_poll(c, "mock/sequential/snowflake", || {
        SnowflakeGenerator::new(0, pinned_clock()).unwrap()
    });
}

/// Single-threaded generate with a steady clock.
fn benchmark_steady_sequential(c: &mut Criterion) {
    bench_snowflake_generate(c, "steady/sequential/snowflake", || {
        SnowflakeGenerator::new(0, SteadyClock::new()).unwrap()
    });
}

/// Shared generator, pinned clock: pure lock contention.
fn benchmark_mock_contended(c: &mut Criterion) {
    bench_snowflake_contended(c, "mock/contended/snowflake", || {
        SnowflakeGenerator::new(0, pinned_clock()).unwrap()
    });
}

/// Shared generator, steady clock: contention plus real throttling.
fn benchmark_steady_contended(c: &mut Criterion) {
    bench_snowflake_contended(c, "steady/contended/snowflake", || {
        SnowflakeGenerator::new(0, SteadyClock::new()).unwrap()
    });
}

/// Sequential GUID generation per database engine.
fn benchmark_comb(c: &mut Criterion) {
    let mut group = c.benchmark_group("system/sequential/comb");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    for engine in DbEngine::ALL {
        let label = match engine {
            DbEngine::MySql => "mysql",
            DbEngine::Oracle => "oracle",
            DbEngine::SqlServer => "sqlserver",
        };
        group.bench_function(format!("{}/elems/{}", label, TOTAL_IDS), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = CombGenerator::new(engine, SystemClock, ThreadEntropy);
                    for _ in 0..TOTAL_IDS {
                        black_box(generator.generate().unwrap());
                    }
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

/// Random and signed token generation.
fn benchmark_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("token");
    group.throughput(Throughput::Elements(1));

    let random = RandomTokenGenerator::new();
    group.bench_function(format!("random/{}", TOKEN_LEN), |b| {
        b.iter(|| black_box(random.generate(TOKEN_LEN)));
    });

    let security = SecurityTokenGenerator::new(TagSigner, ThreadEntropy);
    group.bench_function(format!("security/{}", TOKEN_LEN), |b| {
        b.iter(|| black_box(security.generate(TOKEN_LEN)));
    });

    group.finish();
}

criterion_group!(
    benches,
    // Pinned clock
    benchmark_mock_sequential,
    benchmark_mock_contended,
    // Steady clock (throttling)
    benchmark_steady_sequential,
    benchmark_steady_contended,
    // COMB
    benchmark_comb,
    // Tokens
    benchmark_tokens,
);
criterion_main!(benches);
