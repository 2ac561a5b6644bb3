//! Cache builder.
//!
//! Gathers capacity, policy and allocation settings, validates them once,
//! and produces a [`Cache`]. Capacity can come from any integer type through
//! [`CacheBuilder::try_new`], which rejects negative values eagerly instead
//! of letting them surface later as odd eviction behavior.
//!
//! ## Example
//!
//! ```rust
//! use recency::builder::CacheBuilder;
//! use recency::policy::PolicyKind;
//!
//! let cache = CacheBuilder::new(100)
//!     .policy(PolicyKind::Fifo)
//!     .build::<u64, String>();
//! cache.set(1, "hello".to_string()).unwrap();
//! assert_eq!(
//!     cache.get(&1).unwrap().into_option().as_deref(),
//!     Some(&"hello".to_string())
//! );
//! ```

use std::fmt;
use std::hash::Hash;

use crate::cache::Cache;
use crate::engine::CacheCore;
use crate::error::CacheError;
use crate::policy::{EvictionPolicy, PolicyKind};
use crate::store::OrderedStore;

/// Upper bound on entries reserved up front by [`CacheBuilder::prealloc`].
pub const MAX_PREALLOC: usize = 1 << 20;

/// Builder for [`Cache`] instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
    policy: PolicyKind,
    prealloc: bool,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    /// `0` means unbounded. The policy defaults to LRU.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: PolicyKind::default(),
            prealloc: false,
        }
    }

    /// Starts a builder for a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Starts a builder from a capacity of any integer type.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidConfiguration`] if `capacity` is negative or does
    /// not fit in `usize`.
    ///
    /// ```
    /// use recency::builder::CacheBuilder;
    ///
    /// assert_eq!(CacheBuilder::try_new(16i64).unwrap().capacity(), 16);
    /// assert!(CacheBuilder::try_new(-3i32).is_err());
    /// ```
    pub fn try_new<C>(capacity: C) -> Result<Self, CacheError>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let converted: usize = capacity.try_into().map_err(|_| {
            CacheError::invalid_configuration(format!(
                "capacity must be a non-negative integer that fits in usize, got {capacity}"
            ))
        })?;
        Ok(Self::new(converted))
    }

    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Reserves index and arena space for the full capacity up front, capped
    /// at [`MAX_PREALLOC`] entries. Ignored for unbounded caches.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds a cache using the selected [`PolicyKind`].
    pub fn build<K, V>(self) -> Cache<K, V, PolicyKind>
    where
        K: Eq + Hash + Clone,
    {
        let policy = self.policy;
        self.build_with(policy)
    }

    /// Builds a cache driven by a custom policy; any policy set through
    /// [`policy`](Self::policy) is ignored.
    pub fn build_with<K, V, P>(self, policy: P) -> Cache<K, V, P>
    where
        K: Eq + Hash + Clone,
        P: EvictionPolicy<K, V>,
    {
        let store = if self.prealloc && self.capacity > 0 {
            // one extra slot: a set may hold capacity + 1 entries until eviction
            OrderedStore::with_capacity(self.capacity.saturating_add(1).min(MAX_PREALLOC))
        } else {
            OrderedStore::new()
        };
        Cache::from_core(CacheCore::from_parts(store, policy, self.capacity))
    }
}

impl Default for CacheBuilder {
    /// Unbounded LRU.
    fn default() -> Self {
        Self::unbounded()
    }
}
