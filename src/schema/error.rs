//! Schema backend error definitions

use std::error::Error;
use std::fmt;

/// Schema backend error types
///
/// Represents the failures a backend can surface while performing the
/// authoritative existence check against the backing store.
#[derive(Debug)]
pub enum SchemaError {
    /// Connection to the backing store failed
    ConnectionFailure(String),
    /// The existence-check query itself failed
    QueryFailed(String),
    /// I/O error during a backend operation
    IoError(std::io::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::ConnectionFailure(msg) => write!(f, "Connection failure: {}", msg),
            SchemaError::QueryFailed(msg) => write!(f, "Query failed: {}", msg),
            SchemaError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SchemaError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::IoError(err)
    }
}

/// Result type for schema backend operations
pub type SchemaResult<T> = Result<T, SchemaError>;
