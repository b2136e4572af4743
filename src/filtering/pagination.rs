use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ListParams;

// Window applied when the client asks to paginate without giving sizes
const DEFAULT_PAGE_LIMIT: u64 = 10;
const DEFAULT_PAGE_OFFSET: u64 = 0;

/// One page window requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

/// Parse the pagination window, if one was requested.
///
/// Pagination is opt-in: without the `paginate` parameter the endpoint
/// returns the full result list and this yields `None`. Unparseable sizes
/// fall back to the defaults rather than failing the request.
#[must_use]
pub fn parse_pagination(params: &ListParams) -> Option<PageRequest> {
    params.paginate.as_ref()?;
    let limit = params
        .limit
        .as_deref()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = params
        .offset
        .as_deref()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PAGE_OFFSET);
    Some(PageRequest { limit, offset })
}

/// Paginated response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    /// Amount of records in the whole resultset
    pub length: u64,
    /// Records in the current page
    pub objects: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(length: u64, objects: Vec<T>) -> Self {
        Self { length, objects }
    }
}
