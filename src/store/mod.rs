//! Storage backends for cache policies.
//!
//! Stores own keys and values and keep the order sequence; policies decide
//! how operations move entries within it and which entry to evict.

pub mod ordered;
pub mod traits;

pub use ordered::OrderedStore;
pub use traits::EntryStore;
