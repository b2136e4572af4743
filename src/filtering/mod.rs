//! # Query-String Filtering
//!
//! This module turns the flat query string of a list endpoint into data the
//! query layer can execute, without writing SQL manually.
//!
//! ## Main Components
//!
//! - **[`translate`](translate::translate)**: key/value pairs to typed
//!   [`FilterClause`](translate::FilterClause)s, with soft-delete defaults
//! - **[`build_conditions`](conditions::build_conditions)**: filter clauses
//!   to a Sea-ORM [`Condition`](sea_orm::Condition)
//! - **[`parse_sort`](sort::parse_sort)**: `order_by` parameter parsing
//! - **[`parse_pagination`](pagination::parse_pagination)**: opt-in page
//!   window parsing
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Simple equality
//! GET /tasks?completed=true
//!
//! // Case-insensitive substring / prefix / suffix
//! GET /tasks?title__icontains=urgent
//! GET /tasks?title__istartswith=re
//!
//! // Membership over a comma-separated list
//! GET /tasks?id__in=1,2,3
//!
//! // Traversal into a related entity (deferred to the caller's joins)
//! GET /tasks?owner__profile__email__icontains=@example.org
//!
//! // Ordering and pagination
//! GET /tasks?order_by=-created_at&paginate=true&limit=25&offset=50
//! ```
//!
//! Unknown parameters are dropped rather than rejected, and entities that
//! declare a soft-delete flag are filtered to active records unless the
//! client filters on the flag explicitly.

pub mod conditions;
pub mod pagination;
pub mod sort;
pub mod translate;

// Re-export commonly used items
pub use conditions::{RelatedFilter, TranslatedConditions, build_conditions};
pub use pagination::{Page, PageRequest, parse_pagination};
pub use sort::{find_column, parse_order_by, parse_sort};
pub use translate::{FilterClause, FilterKey, FilterSet, FilterValue, Mutator, translate};
