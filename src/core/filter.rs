//! Filter engine: declarative query-parameter predicates over collections
//!
//! Each entity declares which query parameters are filterable and with
//! which strategy. Parameters outside the declared set are ignored so the
//! API stays tolerant of stray query strings.

use crate::core::field::FieldValue;

/// How a filter parameter compares against a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Case-sensitive full equality against the field's string rendering
    Exact,
    /// Case-insensitive substring containment
    Partial,
    /// Value coerced to true/false and matched exactly
    Boolean,
}

/// A declared filterable parameter.
///
/// `param` may traverse a relationship (e.g. `owner.username`); the
/// entity's `filter_value` accessor handles the traversal.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub param: &'static str,
    pub strategy: Strategy,
}

impl Strategy {
    /// Whether `candidate` matches the raw query-parameter value
    pub fn matches(&self, candidate: &FieldValue, raw: &str) -> bool {
        match self {
            Strategy::Exact => candidate.render() == raw,
            Strategy::Partial => candidate
                .render()
                .to_lowercase()
                .contains(&raw.to_lowercase()),
            Strategy::Boolean => match (coerce_boolean(raw), candidate.as_boolean()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => false,
            },
        }
    }
}

fn coerce_boolean(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Apply every declared filter present in `params` to the collection.
///
/// `resolve` maps an item and a declared parameter name to the field value
/// to compare; returning `None` (e.g. a dangling relationship) excludes
/// the item. Parameters with no matching spec are silently skipped.
pub fn apply_filters<T, F>(
    items: Vec<T>,
    specs: &[FilterSpec],
    params: &[(String, String)],
    resolve: F,
) -> Vec<T>
where
    F: Fn(&T, &str) -> Option<FieldValue>,
{
    let mut items = items;
    for (name, raw) in params {
        let Some(spec) = specs.iter().find(|s| s.param == *name) else {
            continue;
        };
        // Malformed boolean values are ignored like any other stray parameter
        if spec.strategy == Strategy::Boolean && coerce_boolean(raw).is_none() {
            continue;
        }
        items.retain(|item| {
            resolve(item, spec.param)
                .map(|value| spec.strategy.matches(&value, raw))
                .unwrap_or(false)
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_case_sensitive() {
        let value = FieldValue::String("Gold".to_string());
        assert!(Strategy::Exact.matches(&value, "Gold"));
        assert!(!Strategy::Exact.matches(&value, "gold"));
        assert!(!Strategy::Exact.matches(&value, "Gol"));
    }

    #[test]
    fn test_partial_is_case_insensitive_containment() {
        let value = FieldValue::String("Golden Chalice".to_string());
        assert!(Strategy::Partial.matches(&value, "gold"));
        assert!(Strategy::Partial.matches(&value, "CHALICE"));
        assert!(!Strategy::Partial.matches(&value, "silver"));
    }

    #[test]
    fn test_boolean_coercion() {
        let published = FieldValue::Boolean(true);
        assert!(Strategy::Boolean.matches(&published, "true"));
        assert!(Strategy::Boolean.matches(&published, "1"));
        assert!(!Strategy::Boolean.matches(&published, "false"));
        assert!(!Strategy::Boolean.matches(&published, "0"));
        // Uncoercible values never match
        assert!(!Strategy::Boolean.matches(&published, "yes"));
    }

    #[test]
    fn test_boolean_against_non_boolean_field_never_matches() {
        let value = FieldValue::String("true".to_string());
        assert!(!Strategy::Boolean.matches(&value, "true"));
    }

    #[test]
    fn test_exact_on_uuid_rendering() {
        let id = uuid::Uuid::new_v4();
        let value = FieldValue::Uuid(id);
        assert!(Strategy::Exact.matches(&value, &id.to_string()));
        assert!(!Strategy::Exact.matches(&value, "not-an-id"));
    }

    // === apply_filters ===

    const SPECS: &[FilterSpec] = &[
        FilterSpec {
            param: "name",
            strategy: Strategy::Partial,
        },
        FilterSpec {
            param: "shiny",
            strategy: Strategy::Boolean,
        },
    ];

    fn resolve(item: &(&str, bool), param: &str) -> Option<FieldValue> {
        match param {
            "name" => Some(FieldValue::String(item.0.to_string())),
            "shiny" => Some(FieldValue::Boolean(item.1)),
            _ => None,
        }
    }

    #[test]
    fn test_apply_filters_retains_matches() {
        let items = vec![("Gold Coin", true), ("Silver Coin", false), ("gold bar", true)];
        let params = vec![("name".to_string(), "gold".to_string())];
        let out = apply_filters(items, SPECS, &params, resolve);
        assert_eq!(out, vec![("Gold Coin", true), ("gold bar", true)]);
    }

    #[test]
    fn test_apply_filters_stacks_params() {
        let items = vec![("Gold Coin", true), ("Gold Dust", false)];
        let params = vec![
            ("name".to_string(), "gold".to_string()),
            ("shiny".to_string(), "true".to_string()),
        ];
        let out = apply_filters(items, SPECS, &params, resolve);
        assert_eq!(out, vec![("Gold Coin", true)]);
    }

    #[test]
    fn test_apply_filters_ignores_undeclared_params() {
        let items = vec![("Gold Coin", true), ("Silver Coin", false)];
        let params = vec![("rarity".to_string(), "epic".to_string())];
        let out = apply_filters(items, SPECS, &params, resolve);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_apply_filters_ignores_malformed_boolean_value() {
        let items = vec![("Gold Coin", true), ("Silver Coin", false)];
        let params = vec![("shiny".to_string(), "yes".to_string())];
        let out = apply_filters(items, SPECS, &params, resolve);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_apply_filters_unresolvable_value_excludes_item() {
        let items = vec![("Gold Coin", true)];
        let params = vec![("name".to_string(), "gold".to_string())];
        let out = apply_filters(items, SPECS, &params, |_, _| None);
        assert!(out.is_empty());
    }
}
