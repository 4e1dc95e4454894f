//! Schema backend trait definitions

use crate::schema::error::SchemaResult;
use crate::schema::table_ref::TableRef;
use crate::types::CacheKey;

/// Backend trait for the real schema owned by the database-access layer
///
/// The existence cache composes over an implementation of this trait instead
/// of intercepting the access layer's own methods: the cache is the only entry
/// point callers use, and it delegates here for everything it does not answer
/// from memory.
pub trait SchemaBackend: Send + Sync {
    /// Perform the authoritative existence check against the backing store
    ///
    /// Called on every cache miss and on every bypassing lookup. May block on
    /// I/O; the cache never holds its lock across this call.
    fn check_exists(&self, table: &TableRef) -> SchemaResult<bool>;

    /// Canonical cache key for a table reference
    ///
    /// Must be deterministic and collision-free for distinct tables. The
    /// default form is the schema-qualified name; backends with their own
    /// identifier quoting rules override this.
    fn cache_key(&self, table: &TableRef) -> CacheKey {
        table.canonical_key()
    }

    /// Drop any schema metadata the backend holds for the table
    ///
    /// Invoked by cache invalidation so the backend's own bookkeeping stays
    /// consistent with the cache. Defaults to a no-op for backends that keep
    /// no metadata of their own.
    fn remove_metadata(&self, _table: &TableRef) {}
}
