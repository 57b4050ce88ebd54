//! Entity traits defining the core abstraction for all resource types

use crate::core::error::ApiError;
use crate::core::projection::FieldSpec;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities exposed through the API.
///
/// Every entity has an opaque identifier assigned at construction and a
/// creation timestamp stamped once and never mutated.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "treasures")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "treasure")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;
}

/// Trait for entities whose fields are exposed through visibility groups.
///
/// The schema is a static table declared once per entity: every entry names
/// a wire field, the internal accessor it binds to, and the read/write
/// groups it belongs to. The projection engine consults this table; nothing
/// here is computed at runtime.
pub trait Projectable: Entity {
    /// The static field table for this entity, in wire declaration order
    fn schema() -> &'static [FieldSpec];

    /// Read the value of a schema field by its internal key.
    ///
    /// Returns `None` only for keys absent from the schema; derived fields
    /// (e.g. truncated descriptions) are computed here per read.
    fn read_field(&self, key: &str) -> Option<serde_json::Value>;

    /// Apply an incoming wire value to the setter bound to `key`.
    ///
    /// A value of the wrong JSON type is a `BadRequest`; range and length
    /// constraints are the validation engine's concern, not this one's.
    fn write_field(&mut self, key: &str, value: &serde_json::Value) -> Result<(), ApiError>;
}
