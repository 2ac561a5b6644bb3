// ==============================================
// CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Many threads hammering one shared cache. Every operation holds the guard
// for its whole body, so after the threads join the index and the order
// sequence must still agree and the capacity bound must hold.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recency::builder::CacheBuilder;
use recency::cache::Cache;
use recency::policy::PolicyKind;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 5_000;

fn hammer(cache: Arc<Cache<u32, u64, PolicyKind>>, key_space: u32) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(t as u64);
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    let key = rng.gen_range(0..key_space);
                    match rng.gen_range(0..10) {
                        0..=4 => {
                            let _ = cache.get(&key).unwrap();
                        }
                        5..=8 => {
                            cache.set(key, u64::from(key) * 10).unwrap();
                        }
                        _ => {
                            cache.delete(&key).unwrap();
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

mod mixed_workload {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn invariants_hold_after_concurrent_mixed_ops() {
        for policy in [PolicyKind::Fifo, PolicyKind::Lru] {
            let cache = Arc::new(CacheBuilder::new(16).policy(policy).build());
            hammer(Arc::clone(&cache), 64);

            assert!(cache.size().unwrap() <= 16);
            cache.check_invariants().unwrap();
            assert!(!cache.is_corrupted());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn values_are_never_torn() {
        let cache = Arc::new(CacheBuilder::new(32).policy(PolicyKind::Lru).build());
        hammer(Arc::clone(&cache), 128);

        for key in cache.keys().unwrap() {
            let value = cache.peek(&key).unwrap().unwrap();
            assert_eq!(*value, u64::from(key) * 10, "value for {key} does not match its key");
        }
    }
}

mod eviction_under_contention {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn concurrent_inserts_evict_exactly_the_overflow() {
        let capacity = 64;
        let cache: Arc<Cache<u32, u32>> = Arc::new(Cache::new(capacity));
        let evicted = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let per_thread = 500u32;
        let handles: Vec<_> = (0..THREADS as u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let evicted = Arc::clone(&evicted);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..per_thread {
                        let key = t * per_thread + i;
                        let outcome = cache.insert(key, Arc::new(key)).unwrap();
                        if outcome.evicted.is_some() {
                            evicted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let total = THREADS * per_thread as usize;
        assert_eq!(cache.size().unwrap(), capacity);
        assert_eq!(evicted.load(Ordering::Relaxed), total - capacity);
        cache.check_invariants().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn concurrent_clear_and_set_leave_consistent_state() {
        let cache: Arc<Cache<u16, u16>> = Arc::new(Cache::new(8));
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for k in 0..2_000u16 {
                    cache.set(k % 32, k).unwrap();
                }
            })
        };
        let clearer = {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    cache.clear().unwrap();
                }
            })
        };
        writer.join().unwrap();
        clearer.join().unwrap();

        assert!(cache.size().unwrap() <= 8);
        cache.check_invariants().unwrap();
    }
}
