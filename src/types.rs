//! Global type definitions
//!
//! Stores type aliases used globally by the existence cache.

/// Canonical cache key type
///
/// A canonicalized string uniquely naming a table, including its schema
/// qualification. Produced by the schema backend's canonicalization; the cache
/// treats it as an opaque value and never parses it.
pub type CacheKey = String;
