//! First-in, first-out eviction.
//!
//! The base policy: a key's position only changes when it is written.
//! Reading a key, however often, does not protect it from eviction.
//!
//! ```text
//!   set(a) set(b) get(a) set(c)   capacity = 2
//!
//!   head ─► [a] [b]          after set(b)
//!   head ─► [a] [b]          get(a) leaves order untouched
//!   head ─► [b] [c]          set(c) evicts a
//! ```

use crate::policy::EvictionPolicy;

/// Base policy: order tracks writes only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FifoPolicy;

impl<K, V> EvictionPolicy<K, V> for FifoPolicy {
    fn name(&self) -> &'static str {
        "fifo"
    }
}
