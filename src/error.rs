//! Error types for the recency library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by public cache operations and constructors.
//!   Either the configuration was rejected up front, or the cache was left
//!   in an unknown state by a panic inside an earlier operation.
//! - [`InvariantError`]: Returned by `check_invariants` when the store's
//!   index and order sequence disagree.
//!
//! Cache misses and evictions are never errors.
//!
//! ## Example Usage
//!
//! ```
//! use recency::builder::CacheBuilder;
//! use recency::error::CacheError;
//!
//! let err = CacheBuilder::try_new(-1i64).unwrap_err();
//! assert!(matches!(err, CacheError::InvalidConfiguration(_)));
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by cache construction and cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A construction parameter was rejected.
    InvalidConfiguration(String),
    /// An earlier operation panicked while holding the guard; the store and
    /// order sequence may no longer agree.
    CacheCorrupted(String),
}

impl CacheError {
    #[inline]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    #[inline]
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::CacheCorrupted(msg.into())
    }

    /// Returns the error description without the variant prefix.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidConfiguration(msg) | Self::CacheCorrupted(msg) => msg,
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::CacheCorrupted(msg) => write!(f, "cache corrupted: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal store invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
