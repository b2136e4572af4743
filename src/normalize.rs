//! Response normalization.
//!
//! Serializers that emit a `{"model": …, "pk"|"id": …, "fields": {…}}`
//! envelope per record are flattened here into plain JSON objects: `id`
//! first, then the schema's fields in declaration order. The `model` marker,
//! excluded fields, and keys the schema does not declare never survive.

use serde_json::{Map, Value};

use crate::schema::FieldDescriptor;

/// Flatten one serialized record envelope into a plain JSON object.
///
/// Returns `None` when the envelope is malformed (no `fields` map, or
/// neither an `id` nor a `pk`); malformed records are skipped rather than
/// failing the response.
#[must_use]
pub fn normalize_record(
    schema: &[FieldDescriptor],
    excluded: &[String],
    record: &Value,
) -> Option<Value> {
    let fields = record.get("fields")?.as_object()?;
    let id = record.get("id").or_else(|| record.get("pk"))?.clone();

    let mut normalized = Map::new();
    normalized.insert("id".to_string(), id);
    for field in schema {
        if field.name == "id" || excluded.contains(&field.name) {
            continue;
        }
        if let Some(value) = fields.get(&field.name) {
            normalized.insert(field.name.clone(), value.clone());
        }
    }
    Some(Value::Object(normalized))
}

/// Flatten a list of record envelopes, skipping malformed entries.
#[must_use]
pub fn normalize_records(
    schema: &[FieldDescriptor],
    excluded: &[String],
    records: &[Value],
) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| normalize_record(schema, excluded, record))
        .collect()
}
