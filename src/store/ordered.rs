//! Hash-indexed store with an O(1) relocatable order sequence.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          order: IntrusiveList<Entry<K, V>>
//!   ┌─────────┬────────┐
//!   │  "a"    │ id_1 ──┼──────►  head ─► [a] ◄──► [b] ◄──► [c] ◄── tail
//!   │  "b"    │ id_2 ──┼──────────────────┘         │        (newest)
//!   │  "c"    │ id_3 ──┼────────────────────────────┘
//!   └─────────┴────────┘
//! ```
//!
//! - Lookups go through the index, then one arena access.
//! - Relocation to the back is an unlink/relink of one node.
//! - Each node carries its own key so eviction from the head can clean up
//!   the index without a reverse lookup.
//!
//! ## Type Constraints
//! - `K: Eq + Hash + Clone`: the key lives in both the index and its node.
//! - `V`: unconstrained; stored as `Arc<V>`.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::store::traits::EntryStore;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Entry store pairing an `FxHashMap` index with an arena-backed list.
pub struct OrderedStore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
}

impl<K, V> OrderedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            order: IntrusiveList::new(),
        }
    }

    /// Creates a store with room for `capacity` entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
        }
    }

    /// Removes and returns the entry at the front of the order sequence.
    pub fn pop_oldest(&mut self) -> Option<(K, Arc<V>)> {
        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Arc<V>)> {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Position of `key` in the order sequence (0 = oldest). O(n).
    pub fn position(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.order.iter().position(|entry| entry.key == *key)
    }

    /// Checks that the index and order sequence describe the same key set.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but order sequence holds {}",
                self.index.len(),
                self.order.len()
            )));
        }

        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a different key than the index expects",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at freed slot {}",
                        id.index()
                    )));
                },
            }
        }

        Ok(())
    }
}

impl<K, V> EntryStore<K, V> for OrderedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn read(&self, key: &K) -> Option<&Arc<V>> {
        let &id = self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    fn write(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        if let Some(&id) = self.index.get(&key) {
            return self
                .order
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        let id = self.order.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }

    #[inline]
    fn move_to_back(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_back(id),
            None => false,
        }
    }

    #[inline]
    fn oldest_key(&self) -> Option<&K> {
        self.order.front().map(|entry| &entry.key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> Default for OrderedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedStore<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedStore")
            .field("len", &self.index.len())
            .finish_non_exhaustive()
    }
}
