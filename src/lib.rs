//! Relcache table-existence cache library
//!
//! A process-local, persistable boolean cache answering "does relation X exist
//! in the backing store?" for a database-access layer. Lookups fall through to
//! the real schema check exactly once per table; the resulting mapping can be
//! dumped to a snapshot file and pre-loaded on the next start so warm processes
//! never re-query the database for table existence.

// Global type definitions
pub mod types;

// Import various modules
pub mod cache;
pub mod schema;
pub mod snapshot;

// Re-export the caller-facing surface for easier access
pub use cache::{CacheError, CacheResult, CheckOptions, ExistenceCache};
pub use schema::{SchemaBackend, SchemaError, SchemaResult, TableRef};
pub use snapshot::{SnapshotError, SnapshotResult};
pub use types::CacheKey;
