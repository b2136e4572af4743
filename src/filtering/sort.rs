use sea_orm::{ColumnTrait, sea_query::Order};

// Shared default values
const DEFAULT_SORT_COLUMN: &str = "id";

/// Parse an `order_by` parameter: a column name, prefixed with `-` for
/// descending. Missing or empty input falls back to ascending `id`.
#[must_use]
pub fn parse_order_by(order_by: Option<&str>) -> (String, Order) {
    let Some(raw) = order_by else {
        return (DEFAULT_SORT_COLUMN.to_string(), Order::Asc);
    };
    let (name, direction) = match raw.strip_prefix('-') {
        Some(rest) => (rest, Order::Desc),
        None => (raw, Order::Asc),
    };
    if name.is_empty() {
        (DEFAULT_SORT_COLUMN.to_string(), Order::Asc)
    } else {
        (name.to_string(), direction)
    }
}

/// Find column by name or return default
pub fn find_column<C>(column_name: &str, columns: &[(&str, C)], default: C) -> C
where
    C: ColumnTrait + Copy,
{
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == column_name)
        .map_or(default, |&(_, col)| col)
}

/// Resolve an `order_by` parameter against the entity's sortable columns.
pub fn parse_sort<C>(
    order_by: Option<&str>,
    order_column_logic: &[(&str, C)],
    default_column: C,
) -> (C, Order)
where
    C: ColumnTrait + Copy,
{
    let (sort_column, order_direction) = parse_order_by(order_by);
    let order_column = find_column(&sort_column, order_column_logic, default_column);
    (order_column, order_direction)
}
