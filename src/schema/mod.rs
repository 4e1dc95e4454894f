//! Schema backend module
//!
//! This module defines the seam between the existence cache and the
//! database-access layer that owns the real schema:
//! - TableRef: value type naming a (possibly schema-qualified) table
//! - SchemaBackend: trait for the authoritative existence check, key
//!   canonicalization, and schema-metadata removal
//! - SchemaError: errors surfaced by a backend

// Re-export error types and result type
pub mod error;
pub use error::{SchemaError, SchemaResult};

// Re-export the backend trait
pub mod backend;
pub use backend::SchemaBackend;

// Re-export the table reference type
pub mod table_ref;
pub use table_ref::TableRef;
