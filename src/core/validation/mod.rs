//! Validation system
//!
//! Entities expose a `validate` method returning every violation found,
//! never short-circuiting on the first failure. The caller decides what
//! to do with the list; handlers reject writes with 422.

pub mod validators;

use serde::Serialize;

/// A single field-level constraint failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field
    pub field: String,
    /// Stable rule code (`blank`, `too_short`, `too_long`, `out_of_range`, `invalid`)
    pub rule: &'static str,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            rule,
            message: message.into(),
        }
    }
}
