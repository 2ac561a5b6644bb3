//! recency: a bounded, thread-safe key/value cache with pluggable eviction.
//!
//! The crate is layered bottom-up:
//!
//! - [`ds`]: slot arena and arena-backed intrusive list.
//! - [`store`]: the keyed index plus order sequence ([`store::OrderedStore`]).
//! - [`policy`]: eviction policies (FIFO, LRU) as hooks over a store.
//! - [`engine`]: single-threaded [`engine::CacheCore`] enforcing capacity.
//! - [`cache`]: [`cache::Cache`], the guarded, shareable front end.
//! - [`builder`]: validated construction with runtime policy selection.
//!
//! ```
//! use recency::prelude::*;
//!
//! let cache: Cache<&str, u32> = Cache::new(2);
//! cache.set("a", 1).unwrap();
//! cache.set("b", 2).unwrap();
//! cache.get(&"a").unwrap();
//! cache.set("c", 3).unwrap();
//!
//! assert_eq!(cache.keys().unwrap(), vec!["a", "c"]);
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod policy;
pub mod prelude;
pub mod store;
