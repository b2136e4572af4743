use crate::schema::FieldDescriptor;

/// Entity metadata consumed by the filtering and normalization helpers.
///
/// Implement this once per exposed entity; the handlers pass
/// [`schema`](Self::schema) into the translator explicitly, so nothing here
/// is looked up through ambient state.
pub trait CrudMetadata {
    const RESOURCE_NAME_SINGULAR: &str;
    const RESOURCE_NAME_PLURAL: &str;

    /// Filterable fields in declaration order. Declaration order is also the
    /// field order of normalized responses.
    fn schema() -> Vec<FieldDescriptor>;

    /// Fields stripped from normalized responses.
    ///
    /// Defaults to every soft-delete flag field, so clients never see the
    /// bookkeeping column.
    #[must_use]
    fn excluded_fields() -> Vec<String> {
        Self::schema()
            .into_iter()
            .filter(|field| field.is_default_filter)
            .map(|field| field.name)
            .collect()
    }

    /// Relation fields the query layer should eager-load for list and
    /// detail responses.
    #[must_use]
    fn preloads() -> Vec<&'static str> {
        vec![]
    }
}
