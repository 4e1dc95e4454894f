//! Existence cache for table lookups against a backing store
//!
//! This module implements the in-memory existence cache with the following
//! features:
//! - Lookup with insert-on-miss, delegating misses to the schema backend
//! - Per-call cache bypass for callers that need a live check
//! - Invalidation propagated to the backend's own schema metadata
//! - Snapshot persistence so the mapping survives process restarts

use crate::schema::{SchemaBackend, TableRef};
use crate::snapshot;
use crate::types::CacheKey;
use log::{debug, trace};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

pub mod error;
pub use error::{CacheError, CacheResult};

/// Per-call lookup options
///
/// The default (empty) option set uses the cached path. Setting any option
/// makes the lookup skip the cache entirely, neither reading nor writing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Skip the cache and query the backing store directly
    pub bypass_cache: bool,
}

impl CheckOptions {
    /// Options requesting a live check that leaves the cache untouched
    pub fn bypass() -> Self {
        CheckOptions { bypass_cache: true }
    }

    /// True when no option is set and the cached path applies
    pub fn is_default(&self) -> bool {
        *self == CheckOptions::default()
    }
}

/// Table-existence cache attached to one database session
///
/// Stores the boolean result of "does this table exist?" per canonical table
/// key, falling through to the schema backend on the first lookup of each
/// table. Every entry reflects a real check result or a loaded snapshot;
/// entries are never synthesized.
///
/// All mapping access is serialized through a single mutex. The delegated
/// existence check runs outside the critical section, so a slow check for one
/// table never blocks lookups for others.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use relcache::cache::{CheckOptions, ExistenceCache};
/// use relcache::schema::{SchemaBackend, SchemaResult, TableRef};
///
/// struct EverythingExists;
///
/// impl SchemaBackend for EverythingExists {
///     fn check_exists(&self, _table: &TableRef) -> SchemaResult<bool> {
///         Ok(true)
///     }
/// }
///
/// let cache = ExistenceCache::new(Arc::new(EverythingExists));
/// let users = TableRef::qualified("public".to_string(), "users".to_string());
///
/// assert!(cache.exists(&users, CheckOptions::default()).unwrap());
/// assert_eq!(cache.len(), 1);
/// ```
pub struct ExistenceCache {
    /// Schema backend performing the authoritative checks
    backend: Arc<dyn SchemaBackend>,
    /// Mapping from canonical table key to the last observed existence result
    entries: Mutex<HashMap<CacheKey, bool>>,
}

impl ExistenceCache {
    /// Create a new empty existence cache over the given backend
    pub fn new(backend: Arc<dyn SchemaBackend>) -> Self {
        ExistenceCache {
            backend,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create an existence cache with specified initial capacity
    pub fn with_capacity(backend: Arc<dyn SchemaBackend>, capacity: usize) -> Self {
        ExistenceCache {
            backend,
            entries: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Check whether a table exists, consulting the cache unless bypassed
    ///
    /// With default options, a cached entry answers immediately; a miss
    /// delegates to the backend once and stores the result. With any
    /// non-default options the call goes straight to the backend and the
    /// mapping is neither read nor written, even for already-cached tables.
    ///
    /// Backend failures propagate unchanged and are never cached. Racing
    /// misses for the same key may each delegate independently; the mapping
    /// is per-key last-writer-wins.
    pub fn exists(&self, table: &TableRef, options: CheckOptions) -> CacheResult<bool> {
        if !options.is_default() {
            return Ok(self.backend.check_exists(table)?);
        }

        let key = self.backend.cache_key(table);
        if let Some(cached) = self.entries.lock().get(&key).copied() {
            return Ok(cached);
        }

        trace!("existence cache miss for {}", key);
        let found = self.backend.check_exists(table)?;
        self.entries.lock().insert(key, found);

        Ok(found)
    }

    /// Remove a table's cached entry and propagate to the backend
    ///
    /// Uses the same canonicalization as the miss path. The backend's
    /// `remove_metadata` runs regardless of whether the key was cached, so
    /// cache and backend bookkeeping stay consistent.
    pub fn invalidate(&self, table: &TableRef) {
        let key = self.backend.cache_key(table);
        self.entries.lock().remove(&key);
        self.backend.remove_metadata(table);
    }

    /// Serialize the entire current mapping to the file at `path`
    ///
    /// Takes a consistent snapshot under the mapping lock, then serializes
    /// and writes outside it. Overwrites any existing file; a concurrent
    /// in-flight miss may or may not be included.
    pub fn dump(&self, path: impl AsRef<Path>) -> CacheResult<()> {
        let snapshot: BTreeMap<CacheKey, bool> = {
            let entries = self.entries.lock();
            entries.iter().map(|(key, found)| (key.clone(), *found)).collect()
        };

        let count = snapshot.len();
        snapshot::write_snapshot(path.as_ref(), snapshot)?;
        debug!(
            "dumped {} existence entries to {}",
            count,
            path.as_ref().display()
        );

        Ok(())
    }

    /// Dump only if no file exists at `path` yet
    ///
    /// No-op when the file is already there, even if the in-memory mapping
    /// has changed since it was written.
    pub fn dump_if_absent(&self, path: impl AsRef<Path>) -> CacheResult<()> {
        if path.as_ref().exists() {
            return Ok(());
        }
        self.dump(path)
    }

    /// Replace the entire mapping with the contents of the file at `path`
    ///
    /// The file is read and fully validated before anything is applied, then
    /// the mapping is swapped in one step: readers see either the old mapping
    /// or the complete loaded one, never a partial state. Fails on a missing,
    /// truncated, or malformed file, leaving the current mapping untouched.
    pub fn load(&self, path: impl AsRef<Path>) -> CacheResult<()> {
        let loaded = snapshot::read_snapshot(path.as_ref())?;
        let mapping: HashMap<CacheKey, bool> = loaded.into_iter().collect();

        let count = mapping.len();
        *self.entries.lock() = mapping;
        debug!(
            "loaded {} existence entries from {}",
            count,
            path.as_ref().display()
        );

        Ok(())
    }

    /// Load only if a file exists at `path`; otherwise leave the mapping as is
    pub fn load_if_present(&self, path: impl AsRef<Path>) -> CacheResult<()> {
        if !path.as_ref().exists() {
            return Ok(());
        }
        self.load(path)
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
