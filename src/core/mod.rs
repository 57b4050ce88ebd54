//! Core module: the resource-exposure machinery shared by all entities

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod projection;
pub mod query;
pub mod store;
pub mod validation;

pub use entity::{Entity, Projectable};
pub use error::{ApiError, ErrorResponse};
pub use field::{FieldFormat, FieldValue};
pub use filter::{FilterSpec, Strategy};
pub use projection::{Context, FieldSpec};
pub use query::{ListQuery, PaginatedResponse, PaginationMeta, ITEMS_PER_PAGE};
pub use store::Repository;
pub use validation::Violation;
