//! Entity field metadata.
//!
//! The filter translator never looks entity metadata up itself; callers pass
//! a schema of [`FieldDescriptor`]s in, usually via
//! [`CrudMetadata::schema`](crate::traits::CrudMetadata::schema).

use std::collections::HashSet;
use thiserror::Error;

/// Broad value category of a field, used to pick value coercion and the SQL
/// shape of equality filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Text,
    Number,
    Date,
    /// Foreign key to another entity; filter keys may traverse through it.
    Relation,
}

/// Metadata for a single filterable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name as it appears in query-string keys.
    pub name: String,
    pub kind: FieldKind,
    /// Marks the soft-delete flag: queries filter on `flag = true` unless the
    /// client filters on it explicitly.
    pub is_default_filter: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_default_filter: false,
        }
    }

    /// Turn this field into the implicit active-record filter.
    #[must_use]
    pub const fn default_filter(mut self) -> Self {
        self.is_default_filter = true;
        self
    }
}

/// Schema precondition failures.
///
/// These indicate broken caller metadata, not bad request data, so they
/// propagate instead of being silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema declares no fields")]
    Empty,
    #[error("schema declares field `{0}` more than once")]
    DuplicateField(String),
}

/// Validate that a schema has at least one field and no duplicate names.
///
/// # Errors
///
/// Returns [`SchemaError::Empty`] or [`SchemaError::DuplicateField`].
pub fn validate(fields: &[FieldDescriptor]) -> Result<(), SchemaError> {
    if fields.is_empty() {
        return Err(SchemaError::Empty);
    }
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField(field.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_distinct_fields() {
        let fields = vec![
            FieldDescriptor::new("id", FieldKind::Number),
            FieldDescriptor::new("name", FieldKind::Text),
        ];
        assert_eq!(validate(&fields), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_schema() {
        assert_eq!(validate(&[]), Err(SchemaError::Empty));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let fields = vec![
            FieldDescriptor::new("name", FieldKind::Text),
            FieldDescriptor::new("name", FieldKind::Boolean),
        ];
        assert_eq!(
            validate(&fields),
            Err(SchemaError::DuplicateField("name".to_string()))
        );
    }

    #[test]
    fn test_default_filter_builder() {
        let field = FieldDescriptor::new("model_state", FieldKind::Boolean).default_filter();
        assert!(field.is_default_filter);
        assert_eq!(field.kind, FieldKind::Boolean);
    }
}
