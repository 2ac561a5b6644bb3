//! Entry store contract used by eviction policies.
//!
//! A store owns the key/value mapping and an explicit order sequence from
//! oldest (front) to newest (back). It never decides *when* to reorder; that
//! is the policy's job, driven by the cache engine.

use std::sync::Arc;

/// Key/value mapping with an explicit order sequence.
///
/// Values are held as `Arc<V>` so callers can keep a value after the guard
/// protecting the store has been released.
pub trait EntryStore<K, V> {
    /// Returns `true` iff `key` has a live entry.
    fn contains(&self, key: &K) -> bool;

    /// Returns the value for `key` without touching the order sequence.
    fn read(&self, key: &K) -> Option<&Arc<V>>;

    /// Inserts or overwrites. A new key is appended at the back; an
    /// overwritten key keeps its position. Returns the previous value.
    fn write(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>>;

    /// Removes `key` from both the mapping and the order sequence.
    fn remove(&mut self, key: &K) -> Option<Arc<V>>;

    /// Relocates `key` to the newest end. Returns `false` if absent.
    fn move_to_back(&mut self, key: &K) -> bool;

    /// The key at the front of the order sequence.
    fn oldest_key(&self) -> Option<&K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}
