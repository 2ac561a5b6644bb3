//! Guard contention: throughput of one shared cache as threads are added.

use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recency::builder::CacheBuilder;
use recency::cache::Cache;
use recency::policy::PolicyKind;

const CAPACITY: usize = 4096;
const OPS_PER_THREAD: u64 = 20_000;

fn run(cache: &Arc<Cache<u64, u64, PolicyKind>>, threads: usize) {
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = Arc::clone(cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(t as u64);
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    let key = rng.gen_range(0..(CAPACITY as u64 * 2));
                    if rng.gen_bool(0.8) {
                        black_box(cache.get(&key).ok());
                    } else {
                        let _ = cache.set(key, key);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    for policy in [PolicyKind::Fifo, PolicyKind::Lru] {
        for threads in [1usize, 2, 4, 8] {
            group.throughput(Throughput::Elements(OPS_PER_THREAD * threads as u64));
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), threads),
                &threads,
                |b, &threads| {
                    b.iter_custom(|iters| {
                        let cache = Arc::new(CacheBuilder::new(CAPACITY).policy(policy).build());
                        let start = Instant::now();
                        for _ in 0..iters {
                            run(&cache, threads);
                        }
                        start.elapsed()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_contention);
criterion_main!(benches);
