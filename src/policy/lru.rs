//! # Least Recently Used (LRU) eviction
//!
//! Recency tracks both reads and writes: any successful `get` or `set`
//! relocates the key to the back of the order sequence, so the front is
//! always the key that has gone longest without being touched.
//!
//! ## Operations Flow
//!
//! ```text
//!   ACCESS existing item
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!   Before:
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!              LRU                MRU
//!
//!   get(A):
//!     1. Find [A] in the index: O(1)
//!     2. Relocate [A] to the tail: O(1)
//!
//!   After:
//!     head ──► [B] ◄──► [C] ◄──► [A] ◄── tail
//!
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!   INSERT new item (over capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!   set(D):
//!     1. Append [D] at the tail
//!     2. Store is over capacity: select_victim = head = [B]
//!     3. Remove [B]
//!
//!   After:
//!     head ──► [C] ◄──► [A] ◄──► [D] ◄── tail
//! ```
//!
//! A miss never reorders: there is nothing to move. The engine calls
//! [`on_read`](EvictionPolicy::on_read) under the same guard acquisition
//! as the lookup, so a hit and its relocation are one atomic step.
//!
//! ## Example
//!
//! ```
//! use recency::cache::Cache;
//!
//! let cache: Cache<&str, i32> = Cache::new(2);
//! cache.set("a", 1).unwrap();
//! cache.set("b", 2).unwrap();
//! cache.get(&"a").unwrap(); // "a" becomes most recently used
//! cache.set("c", 3).unwrap(); // evicts "b"
//!
//! assert!(cache.has(&"a").unwrap());
//! assert!(!cache.has(&"b").unwrap());
//! assert!(cache.has(&"c").unwrap());
//! ```

use crate::policy::EvictionPolicy;
use crate::store::EntryStore;

/// Least-recently-used policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruPolicy;

impl<K, V> EvictionPolicy<K, V> for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    #[inline]
    fn on_read<S>(&self, store: &mut S, key: &K)
    where
        S: EntryStore<K, V> + ?Sized,
    {
        store.move_to_back(key);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::OrderedStore;

    fn store_abc() -> OrderedStore<&'static str, i32> {
        let mut store = OrderedStore::new();
        store.write("a", Arc::new(1));
        store.write("b", Arc::new(2));
        store.write("c", Arc::new(3));
        store
    }

    #[test]
    fn read_hook_promotes_key() {
        let mut store = store_abc();
        EvictionPolicy::<&str, i32>::on_read(&LruPolicy, &mut store, &"a");
        assert_eq!(store.keys(), vec!["b", "c", "a"]);
        assert_eq!(
            EvictionPolicy::<&str, i32>::select_victim(&LruPolicy, &store),
            Some("b")
        );
    }

    #[test]
    fn read_hook_on_missing_key_is_noop() {
        let mut store = store_abc();
        EvictionPolicy::<&str, i32>::on_read(&LruPolicy, &mut store, &"zzz");
        assert_eq!(store.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn write_hook_promotes_key() {
        let mut store = store_abc();
        EvictionPolicy::<&str, i32>::on_write(&LruPolicy, &mut store, &"b");
        assert_eq!(store.keys(), vec!["a", "c", "b"]);
    }

    #[test]
    fn repeated_reads_keep_key_at_back() {
        let mut store = store_abc();
        for _ in 0..3 {
            EvictionPolicy::<&str, i32>::on_read(&LruPolicy, &mut store, &"b");
        }
        assert_eq!(store.keys(), vec!["a", "c", "b"]);
        assert!(store.check_invariants().is_ok());
    }
}
