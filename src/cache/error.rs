//! Existence cache error definitions

use crate::schema::SchemaError;
use crate::snapshot::SnapshotError;
use std::error::Error;
use std::fmt;

/// Existence cache error types
///
/// Wraps the two failure sources a cache operation can surface: the delegated
/// schema check and the snapshot file I/O. The cache performs no retries and
/// no recovery; every failure reaches the caller.
#[derive(Debug)]
pub enum CacheError {
    /// The delegated existence check failed
    Schema(SchemaError),
    /// Reading or writing the snapshot file failed
    Snapshot(SnapshotError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Schema(err) => write!(f, "Existence check failed: {}", err),
            CacheError::Snapshot(err) => write!(f, "Snapshot error: {}", err),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CacheError::Schema(err) => Some(err),
            CacheError::Snapshot(err) => Some(err),
        }
    }
}

impl From<SchemaError> for CacheError {
    fn from(err: SchemaError) -> Self {
        CacheError::Schema(err)
    }
}

impl From<SnapshotError> for CacheError {
    fn from(err: SnapshotError) -> Self {
        CacheError::Snapshot(err)
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
