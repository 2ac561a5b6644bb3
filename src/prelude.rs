pub use crate::builder::CacheBuilder;
pub use crate::cache::Cache;
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::engine::{CacheCore, SetOutcome};
pub use crate::error::{CacheError, InvariantError};
pub use crate::lookup::Lookup;
pub use crate::policy::{EvictionPolicy, FifoPolicy, LruPolicy, PolicyKind};
pub use crate::store::{EntryStore, OrderedStore};
