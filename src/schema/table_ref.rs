//! Table reference type for naming tables across the cache boundary

use crate::types::CacheKey;
use std::fmt;

/// Reference to a table in the backing store
///
/// Immutable value type holding the table name and an optional schema
/// (namespace) qualification. The canonical key derived from it is what the
/// existence cache stores entries under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Schema (namespace) the table lives in, if qualified
    schema: Option<String>,
    /// Table name
    name: String,
}

impl TableRef {
    /// Create an unqualified table reference
    pub fn new(name: String) -> Self {
        TableRef { schema: None, name }
    }

    /// Create a schema-qualified table reference
    pub fn qualified(schema: String, name: String) -> Self {
        TableRef {
            schema: Some(schema),
            name,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the schema qualification, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Default canonical cache key for this reference
    ///
    /// Distinct tables must map to distinct keys, so the schema qualification
    /// is part of the key: `schema.name` when qualified, the bare name
    /// otherwise.
    pub fn canonical_key(&self) -> CacheKey {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_qualified() {
        let table = TableRef::qualified("public".to_string(), "users".to_string());
        assert_eq!(table.canonical_key(), "public.users");
        assert_eq!(table.schema(), Some("public"));
        assert_eq!(table.name(), "users");
    }

    #[test]
    fn test_canonical_key_unqualified() {
        let table = TableRef::new("users".to_string());
        assert_eq!(table.canonical_key(), "users");
        assert_eq!(table.schema(), None);
    }

    #[test]
    fn test_display_matches_canonical_key() {
        let qualified = TableRef::qualified("audit".to_string(), "events".to_string());
        assert_eq!(qualified.to_string(), qualified.canonical_key());

        let bare = TableRef::new("events".to_string());
        assert_eq!(bare.to_string(), bare.canonical_key());
    }

    #[test]
    fn test_qualification_distinguishes_tables() {
        let in_public = TableRef::qualified("public".to_string(), "users".to_string());
        let in_audit = TableRef::qualified("audit".to_string(), "users".to_string());
        assert_ne!(in_public, in_audit);
        assert_ne!(in_public.canonical_key(), in_audit.canonical_key());
    }
}
