//! # Thread-safe cache
//!
//! [`Cache`] wraps a [`CacheCore`] in a single `parking_lot::Mutex`. Every
//! public operation holds the lock for its whole body: the store access, the
//! policy hook and any eviction. No caller can observe the index and the
//! order sequence disagreeing.
//!
//! ## Concurrency Model
//!
//! ```text
//!   Thread 1           Thread 2           Thread 3
//!      │                  │                  │
//!      │ get(a)           │ set(b, ..)       │ delete(c)
//!      ▼                  ▼                  ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                        Mutex                             │
//!   │                                                          │
//!   │  get() needs exclusive access: a hit may reorder (LRU)   │
//!   │  set() = write + on_write + at most one eviction         │
//!   │  delete()/clear() = index + order removal                │
//!   └──────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │  CacheCore (single-threaded operations)                  │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are handed out as `Arc<V>`, so they outlive the lock without
//! `V: Clone`. Evicted and replaced values are dropped after the lock is
//! released.
//!
//! ## Corruption
//!
//! `parking_lot` locks do not poison. The cache tracks it instead: if an
//! operation panics while holding the lock (for example a key whose `Hash`
//! impl panics mid-eviction), the cache is marked corrupted and every later
//! call returns [`CacheError::CacheCorrupted`]. There is no recovery; drop
//! the cache and build a new one.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use recency::cache::Cache;
//!
//! let cache: Arc<Cache<u32, String>> = Arc::new(Cache::new(128));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..64 {
//!                 cache.set(t * 64 + i, format!("v{i}")).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.size().unwrap(), 128);
//! cache.check_invariants().unwrap();
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::{CacheCore, SetOutcome};
use crate::error::CacheError;
use crate::lookup::Lookup;
use crate::policy::{EvictionPolicy, LruPolicy};

struct Guarded<K, V, P> {
    core: CacheCore<K, V, P>,
    corrupted: bool,
}

/// Marks the cache corrupted if dropped while a panic started inside the
/// critical section is unwinding.
struct CorruptOnUnwind<'a> {
    flag: &'a mut bool,
    panicking_on_entry: bool,
    op: &'static str,
}

impl Drop for CorruptOnUnwind<'_> {
    fn drop(&mut self) {
        if !self.panicking_on_entry && std::thread::panicking() {
            *self.flag = true;
            log::error!("cache operation `{}` panicked; cache marked corrupted", self.op);
        }
    }
}

/// Bounded, thread-safe key/value cache with a pluggable eviction policy.
///
/// Share it across threads with `Arc<Cache<..>>`; every method takes `&self`.
pub struct Cache<K, V, P = LruPolicy> {
    inner: Mutex<Guarded<K, V, P>>,
    capacity: usize,
}

impl<K, V> Cache<K, V, LruPolicy>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache. `capacity == 0` means unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// use recency::cache::Cache;
    ///
    /// let cache: Cache<u64, String> = Cache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, LruPolicy)
    }

    /// Creates an LRU cache from any integer capacity, rejecting negative or
    /// unrepresentable values.
    ///
    /// ```
    /// use recency::cache::Cache;
    ///
    /// assert!(Cache::<u8, u8>::try_with_capacity(8i32).is_ok());
    /// assert!(Cache::<u8, u8>::try_with_capacity(-8i32).is_err());
    /// ```
    pub fn try_with_capacity<C>(capacity: C) -> Result<Self, CacheError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        Ok(crate::builder::CacheBuilder::try_new(capacity)?.build_with(LruPolicy))
    }
}

impl<K, V, P> Cache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K, V>,
{
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        Self::from_core(CacheCore::with_policy(capacity, policy))
    }

    pub(crate) fn from_core(core: CacheCore<K, V, P>) -> Self {
        let capacity = core.capacity();
        log::debug!(
            "created cache (policy={}, capacity={}, unbounded={})",
            core.policy().name(),
            capacity,
            capacity == 0
        );
        Self {
            inner: Mutex::new(Guarded {
                core,
                corrupted: false,
            }),
            capacity,
        }
    }

    /// Runs `f` against the core with the guard held for its whole duration.
    fn with_core<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut CacheCore<K, V, P>) -> R,
    ) -> Result<R, CacheError> {
        let mut guard = self.inner.lock();
        let Guarded { core, corrupted } = &mut *guard;
        if *corrupted {
            return Err(CacheError::corrupted(format!(
                "`{op}` refused: an earlier operation panicked while holding the cache guard"
            )));
        }
        let _sentinel = CorruptOnUnwind {
            flag: corrupted,
            panicking_on_entry: std::thread::panicking(),
            op,
        };
        Ok(f(core))
    }

    /// Returns the value for `key`, or [`Lookup::NotFound`].
    ///
    /// A hit is reported to the policy before the guard is released; under
    /// LRU this makes `key` the most recently used entry.
    pub fn get(&self, key: &K) -> Result<Lookup<Arc<V>>, CacheError> {
        self.with_core("get", |core| core.get(key))
    }

    /// Returns the value for `key`, or `default` on a miss.
    ///
    /// ```
    /// use recency::cache::Cache;
    ///
    /// let cache: Cache<&str, i32> = Cache::new(4);
    /// cache.set("a", 1).unwrap();
    /// assert_eq!(*cache.get_or(&"a", 0).unwrap(), 1);
    /// assert_eq!(*cache.get_or(&"b", 0).unwrap(), 0);
    /// ```
    pub fn get_or(&self, key: &K, default: V) -> Result<Arc<V>, CacheError> {
        Ok(self.get(key)?.unwrap_or_else(|| Arc::new(default)))
    }

    /// Returns the value for `key` without informing the policy.
    pub fn peek(&self, key: &K) -> Result<Option<Arc<V>>, CacheError> {
        self.with_core("peek", |core| core.peek(key).map(Arc::clone))
    }

    /// Inserts or overwrites `key`. Returns the previous value.
    ///
    /// If the insert pushes the cache past capacity, the policy's victim is
    /// evicted before the guard is released. Eviction is silent.
    pub fn set(&self, key: K, value: V) -> Result<Option<Arc<V>>, CacheError> {
        self.set_arc(key, Arc::new(value))
    }

    /// Like [`set`](Self::set) for a value that is already shared.
    pub fn set_arc(&self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, CacheError> {
        Ok(self.insert(key, value)?.previous)
    }

    /// Like [`set_arc`](Self::set_arc), also reporting the evicted entry.
    pub fn insert(&self, key: K, value: Arc<V>) -> Result<SetOutcome<K, V>, CacheError> {
        self.with_core("set", |core| core.set(key, value))
    }

    /// Inserts `key` only if absent. Returns whether the value was stored.
    pub fn add(&self, key: K, value: V) -> Result<bool, CacheError> {
        let outcome = self.with_core("add", |core| core.add(key, Arc::new(value)))?;
        Ok(outcome.is_some())
    }

    /// Sets every pair under one guard acquisition.
    pub fn set_many<I>(&self, entries: I) -> Result<(), CacheError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, Arc<V>)> = entries
            .into_iter()
            .map(|(key, value)| (key, Arc::new(value)))
            .collect();
        let outcomes = self.with_core("set_many", |core| {
            entries
                .into_iter()
                .map(|(key, value)| core.set(key, value))
                .collect::<Vec<_>>()
        })?;
        drop(outcomes);
        Ok(())
    }

    /// Looks up every key under one guard acquisition, in order.
    pub fn get_many<'a, I>(&self, keys: I) -> Result<Vec<Lookup<Arc<V>>>, CacheError>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.with_core("get_many", |core| {
            keys.into_iter().map(|key| core.get(key)).collect()
        })
    }

    /// Removes `key`. Returns whether anything was removed.
    pub fn delete(&self, key: &K) -> Result<bool, CacheError> {
        let removed = self.with_core("delete", |core| core.remove(key))?;
        Ok(removed.is_some())
    }

    /// Removes every key under one guard acquisition. Returns how many were present.
    pub fn delete_many<'a, I>(&self, keys: I) -> Result<usize, CacheError>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let removed = self.with_core("delete_many", |core| {
            keys.into_iter()
                .filter_map(|key| core.remove(key))
                .collect::<Vec<_>>()
        })?;
        Ok(removed.len())
    }

    /// Removes and returns the entry the policy would evict next.
    pub fn pop_oldest(&self) -> Result<Option<(K, Arc<V>)>, CacheError> {
        self.with_core("pop_oldest", |core| core.pop_oldest())
    }

    pub fn has(&self, key: &K) -> Result<bool, CacheError> {
        self.with_core("has", |core| core.contains(key))
    }

    pub fn size(&self) -> Result<usize, CacheError> {
        self.with_core("size", |core| core.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        self.with_core("is_empty", |core| core.is_empty())
    }

    /// Maximum entry count; `0` means unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of keys from next-to-evict to most recently used.
    pub fn keys(&self) -> Result<Vec<K>, CacheError> {
        self.with_core("keys", |core| core.keys())
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        let drained = self.with_core("clear", |core| core.drain())?;
        drop(drained);
        Ok(())
    }

    /// Verifies the index/order bijection and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), CacheError> {
        self.with_core("check_invariants", |core| core.check_invariants())?
            .map_err(|err| CacheError::corrupted(err.message()))
    }

    /// Whether an earlier operation panicked while holding the guard.
    pub fn is_corrupted(&self) -> bool {
        self.inner.lock().corrupted
    }
}

impl<K, V, P> fmt::Debug for Cache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("Cache")
            .field("policy", &guard.core.policy().name())
            .field("len", &guard.core.len())
            .field("capacity", &self.capacity)
            .field("corrupted", &guard.corrupted)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for Cache<K, V, LruPolicy>
where
    K: Eq + Hash + Clone,
{
    /// Unbounded LRU cache.
    fn default() -> Self {
        Self::new(0)
    }
}
