//! Query-string filter translation.
//!
//! Turns the flat key/value pairs of a request query string into typed
//! filter clauses. Each key is matched against the entity schema using a
//! per-field suffix grammar:
//!
//! ```text
//! field_name ("__" related_segment)* ("__" mutator)?
//! ```
//!
//! where `mutator` is one of `istartswith`, `iendswith`, `icontains`, `in`.
//! Keys that match no declared field, or whose suffix fails the grammar, are
//! dropped, so unknown parameters never reach the query layer. Entities with
//! a soft-delete flag get an implicit `flag = true` clause unless the client
//! filtered on the flag itself.

use std::collections::HashMap;

use crate::schema::{self, FieldDescriptor, FieldKind, SchemaError};

/// Comparison mutators selectable through a key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutator {
    /// Case-insensitive prefix match
    IStartsWith,
    /// Case-insensitive suffix match
    IEndsWith,
    /// Case-insensitive substring match
    IContains,
    /// Membership in a comma-separated list
    In,
}

impl Mutator {
    /// Parse a mutator from the final `__` segment of a key.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "istartswith" => Some(Self::IStartsWith),
            "iendswith" => Some(Self::IEndsWith),
            "icontains" => Some(Self::IContains),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// Get the suffix for this mutator
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::IStartsWith => "istartswith",
            Self::IEndsWith => "iendswith",
            Self::IContains => "icontains",
            Self::In => "in",
        }
    }
}

/// A parsed filter key: the bound field, an optional traversal into a
/// related entity (dot-joined), and an optional mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    pub field_name: String,
    pub related_path: Option<String>,
    pub mutator: Option<Mutator>,
}

impl FilterKey {
    /// A plain equality key on `field_name`: no traversal, no mutator.
    #[must_use]
    pub fn bare(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            related_path: None,
            mutator: None,
        }
    }

    const fn is_bare(&self) -> bool {
        self.related_path.is_none() && self.mutator.is_none()
    }
}

/// A coerced filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

/// One typed, field-scoped condition for the query layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub key: FilterKey,
    pub value: FilterValue,
}

/// Ordered, immutable set of filter clauses built from one request.
///
/// Clause order follows schema declaration order rather than query-string
/// order, so two requests with the same parameters in a different order
/// produce equal sets. Injected soft-delete defaults come last.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    #[must_use]
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterClause> {
        self.clauses.iter()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterClause;
    type IntoIter = std::slice::Iter<'a, FilterClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

/// Translate raw query parameters into a [`FilterSet`] for `schema`.
///
/// Unknown and malformed keys become the absence of a filter rather than an
/// error: a single bad parameter never aborts the whole request. Pure
/// function of its inputs, safe to call from any number of handlers at once.
///
/// # Errors
///
/// Returns a [`SchemaError`] when `schema` itself is empty or declares
/// duplicate field names.
pub fn translate(
    schema: &[FieldDescriptor],
    raw: &HashMap<String, String>,
) -> Result<FilterSet, SchemaError> {
    schema::validate(schema)?;

    let mut bound: Vec<(usize, &str, FilterClause)> = Vec::new();
    for (raw_key, raw_value) in raw {
        if let Some((index, key)) = bind_key(schema, raw_key) {
            let value = coerce_value(schema[index].kind, key.mutator, raw_value);
            bound.push((index, raw_key.as_str(), FilterClause { key, value }));
        }
    }

    // Schema declaration order, then raw key within a field: deterministic
    // regardless of the map's iteration order.
    bound.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    let mut clauses: Vec<FilterClause> = bound.into_iter().map(|(_, _, clause)| clause).collect();

    for field in schema.iter().filter(|field| field.is_default_filter) {
        let overridden = clauses
            .iter()
            .any(|clause| clause.key.is_bare() && clause.key.field_name == field.name);
        if !overridden {
            clauses.push(FilterClause {
                key: FilterKey::bare(field.name.clone()),
                value: FilterValue::Bool(true),
            });
        }
    }

    Ok(FilterSet { clauses })
}

/// Bind a raw key to a declared field, longest field name first.
///
/// A field is a candidate when the key is exactly its name or continues it
/// with `__`. Longest-name binding keeps a field from capturing keys that
/// belong to a longer sibling; if the longest candidate's suffix fails the
/// grammar, shorter candidates are still tried before the key is dropped.
fn bind_key(schema: &[FieldDescriptor], key: &str) -> Option<(usize, FilterKey)> {
    let mut candidates: Vec<usize> = schema
        .iter()
        .enumerate()
        .filter(|(_, field)| {
            key.strip_prefix(field.name.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with("__"))
        })
        .map(|(index, _)| index)
        .collect();
    candidates.sort_by_key(|&index| std::cmp::Reverse(schema[index].name.len()));

    for index in candidates {
        let field = &schema[index];
        if let Some((related_path, mutator)) = parse_suffix(&key[field.name.len()..]) {
            return Some((
                index,
                FilterKey {
                    field_name: field.name.clone(),
                    related_path,
                    mutator,
                },
            ));
        }
    }
    None
}

/// Parse what follows the field name: nothing, or `__`-joined traversal
/// segments with an optional trailing mutator. The whole key must be
/// consumed.
fn parse_suffix(rest: &str) -> Option<(Option<String>, Option<Mutator>)> {
    if rest.is_empty() {
        return Some((None, None));
    }
    let segments: Vec<&str> = rest.strip_prefix("__")?.split("__").collect();
    if !segments.iter().all(|segment| is_path_segment(segment)) {
        return None;
    }
    let (path_segments, mutator) = match Mutator::from_suffix(segments[segments.len() - 1]) {
        Some(mutator) => (&segments[..segments.len() - 1], Some(mutator)),
        None => (&segments[..], None),
    };
    let related_path = if path_segments.is_empty() {
        None
    } else {
        Some(path_segments.join("."))
    };
    Some((related_path, mutator))
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

/// Coerce the raw string by the bound field's kind and the mutator.
fn coerce_value(kind: FieldKind, mutator: Option<Mutator>, raw: &str) -> FilterValue {
    match mutator {
        Some(Mutator::In) => {
            FilterValue::List(raw.split(',').map(|part| part.trim().to_string()).collect())
        }
        None if kind == FieldKind::Boolean => FilterValue::Bool(raw.eq_ignore_ascii_case("true")),
        _ => FilterValue::Text(raw.to_string()),
    }
}
