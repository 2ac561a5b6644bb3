use criterion::{Criterion, criterion_group, criterion_main};
use recency::cache::Cache;
use recency::policy::FifoPolicy;

fn bench_fifo_set_get(c: &mut Criterion) {
    c.bench_function("fifo_set_get", |b| {
        b.iter(|| {
            let cache = Cache::with_policy(1024, FifoPolicy);
            for i in 0..1024u64 {
                cache.set(i, i).unwrap();
            }
            for i in 0..1024u64 {
                let _ = cache.get(&i);
            }
        })
    });
}

fn bench_fifo_eviction_churn(c: &mut Criterion) {
    c.bench_function("fifo_eviction_churn", |b| {
        let cache = Cache::with_policy(1024, FifoPolicy);
        let mut next = 0u64;
        b.iter(|| {
            for _ in 0..1024 {
                cache.set(std::hint::black_box(next), next).unwrap();
                next += 1;
            }
        })
    });
}

criterion_group!(benches, bench_fifo_set_get, bench_fifo_eviction_churn);
criterion_main!(benches);
