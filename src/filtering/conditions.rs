//! Lowering of filter clauses into Sea-ORM conditions.
//!
//! Pure data-to-data: the caller owns the connection and executes the query.
//! Clauses that traverse into a related entity are not guessed into SQL
//! here; they are surfaced as [`RelatedFilter`] records so the caller can
//! apply them together with the joins it controls.

use sea_orm::{
    Condition,
    sea_query::{Alias, Expr, SimpleExpr},
};
use uuid::Uuid;

use crate::filtering::translate::{FilterSet, FilterValue, Mutator};
use crate::schema::{FieldDescriptor, FieldKind};

// Basic safety limits
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// A clause deferred to the caller because it targets a related entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedFilter {
    /// The relation field on the main entity (e.g. "owner")
    pub field_name: String,
    /// Dotted path to the related column (e.g. "profile.email")
    pub path: String,
    pub mutator: Option<Mutator>,
    pub value: FilterValue,
}

/// Result of lowering a filter set: the main-entity condition plus any
/// deferred related-entity filters.
#[derive(Debug)]
pub struct TranslatedConditions {
    pub condition: Condition,
    pub related: Vec<RelatedFilter>,
}

impl TranslatedConditions {
    #[must_use]
    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }
}

impl Default for TranslatedConditions {
    fn default() -> Self {
        Self {
            condition: Condition::all(),
            related: Vec::new(),
        }
    }
}

/// Basic value length check
const fn validate_field_value(value: &str) -> bool {
    value.len() <= MAX_FIELD_VALUE_LENGTH
}

/// Build a case-insensitive LIKE over a column, single quotes escaped.
fn build_like_condition(field: &str, pattern: &str) -> SimpleExpr {
    let escaped = pattern.replace('\'', "''");
    SimpleExpr::Custom(format!("UPPER({field}) LIKE UPPER('{escaped}')"))
}

const fn like_pattern(mutator: Mutator) -> Option<(&'static str, &'static str)> {
    match mutator {
        Mutator::IStartsWith => Some(("", "%")),
        Mutator::IEndsWith => Some(("%", "")),
        Mutator::IContains => Some(("%", "%")),
        Mutator::In => None,
    }
}

fn process_equality(field: &str, kind: FieldKind, value: &str) -> Option<SimpleExpr> {
    if !validate_field_value(value) {
        return None;
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Number => {
            if let Ok(int_value) = trimmed.parse::<i64>() {
                Some(Expr::col(Alias::new(field)).eq(int_value))
            } else if let Ok(float_value) = trimmed.parse::<f64>() {
                Some(Expr::col(Alias::new(field)).eq(float_value))
            } else {
                None
            }
        }
        FieldKind::Date => Some(Expr::col(Alias::new(field)).eq(trimmed)),
        FieldKind::Boolean | FieldKind::Text | FieldKind::Relation => {
            // UUIDs compare as typed values, everything else case-insensitively
            if let Ok(uuid_value) = Uuid::parse_str(trimmed) {
                return Some(Expr::col(Alias::new(field)).eq(uuid_value));
            }
            Some(
                SimpleExpr::FunctionCall(sea_orm::sea_query::Func::upper(Expr::col(Alias::new(
                    field,
                ))))
                .eq(trimmed.to_uppercase()),
            )
        }
    }
}

fn process_list(field: &str, values: &[String]) -> Option<SimpleExpr> {
    if values.is_empty() {
        return None;
    }
    Some(Expr::col(Alias::new(field)).is_in(values.to_vec()))
}

fn process_like(field: &str, mutator: Mutator, value: &str) -> Option<SimpleExpr> {
    if !validate_field_value(value) {
        return None;
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (before, after) = like_pattern(mutator)?;
    Some(build_like_condition(
        field,
        &format!("{before}{trimmed}{after}"),
    ))
}

fn build_clause_expr(
    field: &str,
    kind: FieldKind,
    mutator: Option<Mutator>,
    value: &FilterValue,
) -> Option<SimpleExpr> {
    match (mutator, value) {
        (Some(Mutator::In), FilterValue::List(values)) => process_list(field, values),
        (Some(mutator), FilterValue::Text(text)) => process_like(field, mutator, text),
        (None, FilterValue::Bool(flag)) => Some(Expr::col(Alias::new(field)).eq(*flag)),
        (None, FilterValue::Text(text)) => process_equality(field, kind, text),
        _ => None,
    }
}

/// Lower `filters` into a main-entity [`Condition`] plus deferred
/// related-entity filters.
///
/// Clauses with values the column cannot hold (a non-numeric string against
/// a number column, an over-long value) are skipped, matching the
/// drop-don't-fail behavior of the translator.
#[must_use]
pub fn build_conditions(schema: &[FieldDescriptor], filters: &FilterSet) -> TranslatedConditions {
    let mut condition = Condition::all();
    let mut related = Vec::new();

    for clause in filters {
        if let Some(path) = &clause.key.related_path {
            related.push(RelatedFilter {
                field_name: clause.key.field_name.clone(),
                path: path.clone(),
                mutator: clause.key.mutator,
                value: clause.value.clone(),
            });
            continue;
        }
        let Some(field) = schema
            .iter()
            .find(|field| field.name == clause.key.field_name)
        else {
            continue;
        };
        if let Some(expr) =
            build_clause_expr(&field.name, field.kind, clause.key.mutator, &clause.value)
        {
            condition = condition.add(expr);
        }
    }

    TranslatedConditions { condition, related }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::translate::translate;
    use std::collections::HashMap;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_injected_default_lowers_to_boolean_equality() {
        let schema = vec![FieldDescriptor::new("model_state", FieldKind::Boolean).default_filter()];
        let filters = translate(&schema, &HashMap::new()).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected = Condition::all().add(Expr::col(Alias::new("model_state")).eq(true));
        assert_eq!(lowered.condition, expected);
        assert!(!lowered.has_related());
    }

    #[test]
    fn test_icontains_lowers_to_upper_like() {
        let schema = vec![FieldDescriptor::new("name", FieldKind::Text)];
        let filters = translate(&schema, &query(&[("name__icontains", "John")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected = Condition::all().add(SimpleExpr::Custom(
            "UPPER(name) LIKE UPPER('%John%')".to_string(),
        ));
        assert_eq!(lowered.condition, expected);
    }

    #[test]
    fn test_istartswith_and_iendswith_patterns() {
        let schema = vec![FieldDescriptor::new("name", FieldKind::Text)];

        let filters = translate(&schema, &query(&[("name__istartswith", "Jo")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert_eq!(
            lowered.condition,
            Condition::all().add(SimpleExpr::Custom(
                "UPPER(name) LIKE UPPER('Jo%')".to_string()
            ))
        );

        let filters = translate(&schema, &query(&[("name__iendswith", "hn")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert_eq!(
            lowered.condition,
            Condition::all().add(SimpleExpr::Custom(
                "UPPER(name) LIKE UPPER('%hn')".to_string()
            ))
        );
    }

    #[test]
    fn test_like_value_quotes_are_escaped() {
        let schema = vec![FieldDescriptor::new("name", FieldKind::Text)];
        let filters = translate(&schema, &query(&[("name__icontains", "O'Brien")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert_eq!(
            lowered.condition,
            Condition::all().add(SimpleExpr::Custom(
                "UPPER(name) LIKE UPPER('%O''Brien%')".to_string()
            ))
        );
    }

    #[test]
    fn test_in_clause_lowers_to_is_in() {
        let schema = vec![FieldDescriptor::new("id", FieldKind::Number)];
        let filters = translate(&schema, &query(&[("id__in", "1, 2,3")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected = Condition::all().add(Expr::col(Alias::new("id")).is_in(vec![
            "1".to_string(),
            "2".to_string(),
            "3".to_string(),
        ]));
        assert_eq!(lowered.condition, expected);
    }

    #[test]
    fn test_number_equality_parses_value() {
        let schema = vec![FieldDescriptor::new("priority", FieldKind::Number)];
        let filters = translate(&schema, &query(&[("priority", "5")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected = Condition::all().add(Expr::col(Alias::new("priority")).eq(5_i64));
        assert_eq!(lowered.condition, expected);
    }

    #[test]
    fn test_unparseable_number_is_skipped() {
        let schema = vec![FieldDescriptor::new("priority", FieldKind::Number)];
        let filters = translate(&schema, &query(&[("priority", "high")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert_eq!(lowered.condition, Condition::all());
    }

    #[test]
    fn test_uuid_equality_is_typed() {
        let schema = vec![FieldDescriptor::new("owner", FieldKind::Relation)];
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let filters = translate(&schema, &query(&[("owner", id)])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected =
            Condition::all().add(Expr::col(Alias::new("owner")).eq(Uuid::parse_str(id).unwrap()));
        assert_eq!(lowered.condition, expected);
    }

    #[test]
    fn test_text_equality_is_case_insensitive() {
        let schema = vec![FieldDescriptor::new("name", FieldKind::Text)];
        let filters = translate(&schema, &query(&[("name", "Report")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        let expected = Condition::all().add(
            SimpleExpr::FunctionCall(sea_orm::sea_query::Func::upper(Expr::col(Alias::new(
                "name",
            ))))
            .eq("REPORT".to_string()),
        );
        assert_eq!(lowered.condition, expected);
    }

    #[test]
    fn test_related_clause_is_deferred_not_lowered() {
        let schema = vec![
            FieldDescriptor::new("owner", FieldKind::Relation),
            FieldDescriptor::new("model_state", FieldKind::Boolean).default_filter(),
        ];
        let filters = translate(&schema, &query(&[("owner__email__icontains", "@")])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert!(lowered.has_related());
        assert_eq!(
            lowered.related,
            vec![RelatedFilter {
                field_name: "owner".to_string(),
                path: "email".to_string(),
                mutator: Some(Mutator::IContains),
                value: FilterValue::Text("@".to_string()),
            }]
        );
        // Main condition still carries the soft-delete default
        assert_eq!(
            lowered.condition,
            Condition::all().add(Expr::col(Alias::new("model_state")).eq(true))
        );
    }

    #[test]
    fn test_over_long_value_is_skipped() {
        let schema = vec![FieldDescriptor::new("name", FieldKind::Text)];
        let huge = "x".repeat(MAX_FIELD_VALUE_LENGTH + 1);
        let filters = translate(&schema, &query(&[("name__icontains", huge.as_str())])).unwrap();
        let lowered = build_conditions(&schema, &filters);
        assert_eq!(lowered.condition, Condition::all());
    }
}
