//! Reusable field validators
//!
//! Each validator checks one constraint and returns `Some(Violation)` on
//! failure. Entity `validate` methods chain them and collect everything.

use super::Violation;
use crate::core::field::FieldFormat;

/// String must not be empty
pub fn not_blank(field: &str, value: &str) -> Option<Violation> {
    if value.is_empty() {
        Some(Violation::new(
            field,
            "blank",
            format!("'{}' must not be blank", field),
        ))
    } else {
        None
    }
}

/// String length (in characters) must be within `[min, max]`
pub fn length(field: &str, value: &str, min: usize, max: usize) -> Option<Violation> {
    let len = value.chars().count();
    if len < min {
        Some(Violation::new(
            field,
            "too_short",
            format!("'{}' must be at least {} characters (currently: {})", field, min, len),
        ))
    } else if len > max {
        Some(Violation::new(
            field,
            "too_long",
            format!("'{}' must not exceed {} characters (currently: {})", field, max, len),
        ))
    } else {
        None
    }
}

/// Number must be greater than or equal to `min`
pub fn min_value(field: &str, value: i64, min: i64) -> Option<Violation> {
    if value < min {
        Some(Violation::new(
            field,
            "out_of_range",
            format!("'{}' must be at least {} (value: {})", field, min, value),
        ))
    } else {
        None
    }
}

/// Number must be within `[min, max]`
pub fn range(field: &str, value: i64, min: i64, max: i64) -> Option<Violation> {
    if value < min || value > max {
        Some(Violation::new(
            field,
            "out_of_range",
            format!("'{}' must be between {} and {} (value: {})", field, min, max, value),
        ))
    } else {
        None
    }
}

/// String must match the given format
pub fn matches_format(field: &str, value: &str, format: &FieldFormat) -> Option<Violation> {
    if format.validate(value) {
        None
    } else {
        Some(Violation::new(
            field,
            "invalid",
            format!("'{}' has an invalid format (value: {})", field, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === not_blank() ===

    #[test]
    fn test_not_blank_empty_string_fails() {
        let violation = not_blank("name", "").expect("empty string should fail");
        assert_eq!(violation.rule, "blank");
        assert_eq!(violation.field, "name");
    }

    #[test]
    fn test_not_blank_non_empty_passes() {
        assert!(not_blank("name", "Gold Coins").is_none());
    }

    // === length() ===

    #[test]
    fn test_length_too_short_fails() {
        let violation = length("name", "A", 2, 50).expect("one char should fail");
        assert_eq!(violation.rule, "too_short");
        assert!(violation.message.contains("at least 2"));
    }

    #[test]
    fn test_length_too_long_fails() {
        let violation = length("name", &"x".repeat(51), 2, 50).expect("51 chars should fail");
        assert_eq!(violation.rule, "too_long");
        assert!(violation.message.contains("exceed 50"));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        assert!(length("name", "Ab", 2, 50).is_none());
        assert!(length("name", &"x".repeat(50), 2, 50).is_none());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, six bytes
        assert!(length("name", "éé", 2, 50).is_none());
    }

    // === min_value() ===

    #[test]
    fn test_min_value_below_fails() {
        let violation = min_value("value", -1, 0).expect("negative should fail");
        assert_eq!(violation.rule, "out_of_range");
    }

    #[test]
    fn test_min_value_at_bound_passes() {
        assert!(min_value("value", 0, 0).is_none());
    }

    // === range() ===

    #[test]
    fn test_range_above_fails() {
        let violation = range("coolfactor", 901, 0, 900).expect("901 should fail");
        assert_eq!(violation.rule, "out_of_range");
        assert!(violation.message.contains("between 0 and 900"));
    }

    #[test]
    fn test_range_below_fails() {
        assert!(range("coolfactor", -1, 0, 900).is_some());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(range("coolfactor", 0, 0, 900).is_none());
        assert!(range("coolfactor", 900, 0, 900).is_none());
    }

    // === matches_format() ===

    #[test]
    fn test_matches_format_invalid_fails() {
        let violation = matches_format("username", "no spaces allowed", &FieldFormat::Username)
            .expect("spaces should fail");
        assert_eq!(violation.rule, "invalid");
    }

    #[test]
    fn test_matches_format_valid_passes() {
        assert!(matches_format("username", "smaug_42", &FieldFormat::Username).is_none());
    }
}
