//! Single-threaded cache engine.
//!
//! [`CacheCore`] composes an [`OrderedStore`], one [`EvictionPolicy`] and a
//! capacity bound. Every compound operation (lookup + hook, write + hook +
//! eviction) is a single `&mut self` call, so wrapping the core in one lock
//! is enough to make each of them atomic. [`Cache`](crate::cache::Cache) is
//! that wrapper.
//!
//! ## Operations
//!
//! | Method           | Complexity | Policy hook                          |
//! |------------------|------------|--------------------------------------|
//! | `get(&k)`        | O(1)       | `on_read` on hit                     |
//! | `peek(&k)`       | O(1)       | none                                 |
//! | `set(k, v)`      | O(1)       | `on_write`, then `select_victim` if  |
//! |                  |            | the store grew past capacity         |
//! | `remove(&k)`     | O(1)       | none                                 |
//! | `pop_oldest()`   | O(1)       | `select_victim`                      |
//! | `keys()`         | O(n)       | none                                 |
//!
//! A capacity of `0` means unbounded: eviction never triggers.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use recency::engine::CacheCore;
//! use recency::policy::FifoPolicy;
//!
//! let mut core = CacheCore::with_policy(2, FifoPolicy);
//! core.set("a", Arc::new(1));
//! core.set("b", Arc::new(2));
//! assert!(core.get(&"a").is_found()); // FIFO: does not protect "a"
//!
//! let outcome = core.set("c", Arc::new(3));
//! assert_eq!(outcome.evicted.map(|(k, _)| k), Some("a"));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::InvariantError;
use crate::lookup::Lookup;
use crate::policy::{EvictionPolicy, LruPolicy};
use crate::store::{EntryStore, OrderedStore};

/// What a `set` did to the store.
#[derive(Debug)]
#[must_use]
pub struct SetOutcome<K, V> {
    /// Value replaced by the write, if the key was already present.
    pub previous: Option<Arc<V>>,
    /// Entry removed to bring the store back within capacity.
    pub evicted: Option<(K, Arc<V>)>,
}

/// Store + policy + capacity, without synchronization.
pub struct CacheCore<K, V, P = LruPolicy> {
    store: OrderedStore<K, V>,
    policy: P,
    capacity: usize,
}

impl<K, V> CacheCore<K, V, LruPolicy>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU engine. `capacity == 0` means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, LruPolicy)
    }
}

impl<K, V, P> CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K, V>,
{
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        Self::from_parts(OrderedStore::new(), policy, capacity)
    }

    pub(crate) fn from_parts(store: OrderedStore<K, V>, policy: P, capacity: usize) -> Self {
        Self {
            store,
            policy,
            capacity,
        }
    }

    /// Looks up `key`, letting the policy react to a hit.
    #[inline]
    pub fn get(&mut self, key: &K) -> Lookup<Arc<V>> {
        let Some(value) = self.store.read(key).map(Arc::clone) else {
            return Lookup::NotFound;
        };
        self.policy.on_read(&mut self.store, key);
        Lookup::Found(value)
    }

    /// Looks up `key` without informing the policy.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&Arc<V>> {
        self.store.read(key)
    }

    /// Inserts or overwrites `key`, then evicts at most one entry if the
    /// store grew past capacity.
    pub fn set(&mut self, key: K, value: Arc<V>) -> SetOutcome<K, V> {
        let previous = self.store.write(key.clone(), value);
        self.policy.on_write(&mut self.store, &key);
        let evicted = self.evict_overflow();
        SetOutcome { previous, evicted }
    }

    /// Inserts `key` only if it is absent. Returns `None` when the key was
    /// already present; the existing entry and its order are untouched.
    pub fn add(&mut self, key: K, value: Arc<V>) -> Option<SetOutcome<K, V>> {
        if self.store.contains(&key) {
            return None;
        }
        Some(self.set(key, value))
    }

    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.store.remove(key)
    }

    /// Removes the entry the policy would evict next.
    pub fn pop_oldest(&mut self) -> Option<(K, Arc<V>)> {
        let victim = self.policy.select_victim(&self.store)?;
        let value = self.store.remove(&victim)?;
        Some((victim, value))
    }

    fn evict_overflow(&mut self) -> Option<(K, Arc<V>)> {
        if self.capacity == 0 || self.store.len() <= self.capacity {
            return None;
        }

        if let Some(evicted) = self.pop_oldest() {
            log::trace!(
                "{} policy evicted an entry (len={}, capacity={})",
                self.policy.name(),
                self.store.len(),
                self.capacity
            );
            return Some(evicted);
        }

        // policy named no resident victim: fall back to the front of the order
        log::warn!(
            "{} policy selected no resident victim; evicting oldest entry (len={}, capacity={})",
            self.policy.name(),
            self.store.len(),
            self.capacity
        );
        self.store.pop_oldest()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Maximum entry count; `0` means unbounded.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Keys from next-to-evict to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.store.keys()
    }

    /// Position of `key` in the order sequence; `0` is the next victim.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.store.position(key)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Removes every entry, returning them oldest first.
    pub fn drain(&mut self) -> Vec<(K, Arc<V>)> {
        let mut drained = Vec::with_capacity(self.store.len());
        while let Some(entry) = self.store.pop_oldest() {
            drained.push(entry);
        }
        drained
    }

    /// Checks the index/order bijection and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.check_invariants()?;
        if self.capacity > 0 && self.store.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "store holds {} entries, capacity is {}",
                self.store.len(),
                self.capacity
            )));
        }
        Ok(())
    }
}

impl<K, V, P> fmt::Debug for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCore")
            .field("policy", &self.policy.name())
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for CacheCore<K, V, LruPolicy>
where
    K: Eq + Hash + Clone,
{
    /// Unbounded LRU engine.
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V, P> Extend<(K, Arc<V>)> for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy<K, V>,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            let _ = self.set(key, value);
        }
    }
}
