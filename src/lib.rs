//! Query-string filtering, soft-delete defaults, and response shaping for
//! CRUD APIs built with Axum and Sea-ORM.
//!
//! The crate takes the flat query string of a list endpoint and turns it
//! into data the query layer can execute: typed filter clauses with an
//! implicit soft-delete default ([`filtering::translate`]), Sea-ORM
//! conditions ([`filtering::conditions`]), ordering ([`filtering::sort`]),
//! and an opt-in pagination window ([`filtering::pagination`]). On the way
//! out it flattens serializer envelopes into plain JSON ([`normalize`]) and
//! shapes mutation and error responses ([`responses`]).
//!
//! Everything here is pure data-in, data-out: no handler in this crate
//! touches a database connection.

pub mod filtering;
pub mod models;
pub mod normalize;
pub mod responses;
pub mod schema;
pub mod traits;

pub use filtering::{
    FilterClause, FilterKey, FilterSet, FilterValue, Mutator, Page, PageRequest, RelatedFilter,
    TranslatedConditions, build_conditions, parse_order_by, parse_pagination, parse_sort,
    translate,
};
pub use models::ListParams;
pub use normalize::{normalize_record, normalize_records};
pub use responses::{ApiError, MessageBody};
pub use schema::{FieldDescriptor, FieldKind, SchemaError};
pub use traits::CrudMetadata;
