//! Eviction policies.
//!
//! A policy never owns entries. It is handed the [`EntryStore`] by the cache
//! engine after each successful access and decides how that access moves the
//! key within the order sequence, and which key to give up when the cache
//! grows past capacity.
//!
//! | Policy        | `on_read`     | `on_write`    | Victim            |
//! |---------------|---------------|---------------|-------------------|
//! | [`FifoPolicy`]| no-op         | move to back  | oldest in order   |
//! | [`LruPolicy`] | move to back  | move to back  | oldest in order   |
//!
//! Both variants evict from the front; they differ only in whether a read
//! counts as a use. New policies implement [`EvictionPolicy`] directly.
//! [`PolicyKind`] is the closed set of built-in policies, for callers that
//! pick one at runtime.

pub mod fifo;
pub mod lru;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use crate::store::EntryStore;

/// Capability interface consulted by the cache engine.
///
/// Hooks run while the cache guard is held, so they observe and mutate the
/// store atomically with the operation that triggered them.
pub trait EvictionPolicy<K, V> {
    /// Short name used in logs and `Debug` output.
    fn name(&self) -> &'static str;

    /// Called after a `get` that found `key`.
    fn on_read<S>(&self, store: &mut S, key: &K)
    where
        S: EntryStore<K, V> + ?Sized,
    {
        let _ = (store, key);
    }

    /// Called after every successful `set` of `key`.
    fn on_write<S>(&self, store: &mut S, key: &K)
    where
        S: EntryStore<K, V> + ?Sized,
    {
        store.move_to_back(key);
    }

    /// Key to evict once the store exceeds capacity.
    fn select_victim<S>(&self, store: &S) -> Option<K>
    where
        K: Clone,
        S: EntryStore<K, V> + ?Sized,
    {
        store.oldest_key().cloned()
    }
}

/// Built-in policies, selectable at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Insertion order; reads do not affect eviction.
    Fifo,
    /// Least recently used; reads and writes both refresh a key.
    #[default]
    Lru,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<K, V> EvictionPolicy<K, V> for PolicyKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn on_read<S>(&self, store: &mut S, key: &K)
    where
        S: EntryStore<K, V> + ?Sized,
    {
        match self {
            PolicyKind::Fifo => EvictionPolicy::<K, V>::on_read(&FifoPolicy, store, key),
            PolicyKind::Lru => EvictionPolicy::<K, V>::on_read(&LruPolicy, store, key),
        }
    }

    fn on_write<S>(&self, store: &mut S, key: &K)
    where
        S: EntryStore<K, V> + ?Sized,
    {
        match self {
            PolicyKind::Fifo => EvictionPolicy::<K, V>::on_write(&FifoPolicy, store, key),
            PolicyKind::Lru => EvictionPolicy::<K, V>::on_write(&LruPolicy, store, key),
        }
    }

    fn select_victim<S>(&self, store: &S) -> Option<K>
    where
        K: Clone,
        S: EntryStore<K, V> + ?Sized,
    {
        match self {
            PolicyKind::Fifo => EvictionPolicy::<K, V>::select_victim(&FifoPolicy, store),
            PolicyKind::Lru => EvictionPolicy::<K, V>::select_victim(&LruPolicy, store),
        }
    }
}
