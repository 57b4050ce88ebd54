//! Field value types and format validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value used by the filter engine and entity accessors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Canonical string rendering used for filter comparisons.
    ///
    /// Identifiers render as their hyphenated UUID form, timestamps as
    /// RFC 3339. `Null` renders empty and therefore never matches an
    /// exact or partial filter with a non-empty value.
    pub fn render(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
            FieldValue::Null => String::new(),
        }
    }
}

/// Field format validators for string fields
#[derive(Debug, Clone)]
pub enum FieldFormat {
    /// Letters, digits and underscores only
    Username,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Username => Self::is_valid_username(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_username(username: &str) -> bool {
        static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = USERNAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());
        regex.is_match(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_string(), None);
        assert_eq!(value.render(), "");
    }

    #[test]
    fn test_render_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(FieldValue::Uuid(id).render(), id.to_string());
    }

    #[test]
    fn test_render_boolean() {
        assert_eq!(FieldValue::Boolean(true).render(), "true");
        assert_eq!(FieldValue::Boolean(false).render(), "false");
    }

    #[test]
    fn test_render_integer() {
        assert_eq!(FieldValue::Integer(-7).render(), "-7");
    }

    #[test]
    fn test_username_format() {
        let format = FieldFormat::Username;

        assert!(format.validate("smaug_42"));
        assert!(format.validate("Bilbo"));
        assert!(!format.validate("not valid"));
        assert!(!format.validate("héros"));
        assert!(!format.validate(""));
    }

    #[test]
    fn test_custom_regex_format() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());

        assert!(format.validate("ABC123"));
        assert!(!format.validate("abc123"));
    }

    #[test]
    fn test_serde_roundtrip_string() {
        let original = FieldValue::String("hello".to_string());
        let json = serde_json::to_string(&original).expect("serialize should succeed");
        let restored: FieldValue =
            serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(original, restored);
    }
}
