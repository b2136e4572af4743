use serde::Deserialize;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

/// Query parameters controlling list output.
///
/// # Pagination
/// Pagination is opt-in: send `paginate` (any value) to receive the
/// `{length, objects}` envelope instead of a plain list. `limit` and
/// `offset` size the window, defaulting to 10 and 0.
///
/// # Ordering
/// `order_by` names the sort column; prefix it with `-` for descending, for
/// example `order_by=-created_at`.
///
/// Filter keys ride in the same query string and are handled separately by
/// the filter translator; the control keys below simply fail its field
/// grammar and are ignored there.
#[derive(Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Present (with any value) to request paginated results.
    #[param(example = "true")]
    pub paginate: Option<String>,
    /// Number of records to resolve per page.
    #[param(example = "10")]
    pub limit: Option<String>,
    /// Element number where the page starts.
    #[param(example = "0")]
    pub offset: Option<String>,
    /// Sort column, `-` prefixed for descending.
    #[param(example = "-created_at")]
    pub order_by: Option<String>,
}

impl ListParams {
    /// Extract the control parameters from a full query map.
    ///
    /// Lets one flat map feed both this struct and the filter translator.
    #[must_use]
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            paginate: query.get("paginate").cloned(),
            limit: query.get("limit").cloned(),
            offset: query.get("offset").cloned(),
            order_by: query.get("order_by").cloned(),
        }
    }
}
