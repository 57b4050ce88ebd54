//! User entity: owns zero or more treasures

use crate::core::entity::{Entity, Projectable};
use crate::core::error::ApiError;
use crate::core::field::{FieldFormat, FieldValue};
use crate::core::filter::{FilterSpec, Strategy};
use crate::core::projection::{self, FieldSpec};
use crate::core::validation::{validators, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Declared filterable parameters for user collections
pub static USER_FILTERS: &[FilterSpec] = &[FilterSpec {
    param: "username",
    strategy: Strategy::Partial,
}];

static USER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        wire: "id",
        key: "id",
        read_groups: &[projection::USER_READ],
        write_groups: &[],
    },
    FieldSpec {
        wire: "username",
        key: "username",
        read_groups: &[projection::USER_READ],
        write_groups: &[projection::USER_WRITE],
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    /// Check every declared constraint; all violations are collected
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        violations.extend(validators::not_blank("username", &self.username));
        violations.extend(validators::length("username", &self.username, 2, 30));
        if !self.username.is_empty() {
            violations.extend(validators::matches_format(
                "username",
                &self.username,
                &FieldFormat::Username,
            ));
        }
        violations
    }

    /// Resolve a declared filter parameter to this user's field value
    pub fn filter_value(&self, param: &str) -> Option<FieldValue> {
        match param {
            "username" => Some(FieldValue::String(self.username.clone())),
            _ => None,
        }
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Projectable for User {
    fn schema() -> &'static [FieldSpec] {
        USER_FIELDS
    }

    fn read_field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::String(self.id.to_string())),
            "username" => Some(Value::String(self.username.clone())),
            _ => None,
        }
    }

    fn write_field(&mut self, key: &str, value: &Value) -> Result<(), ApiError> {
        match key {
            "username" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ApiError::BadRequest("'username' must be a string".to_string()))?;
                self.username = s.to_string();
                Ok(())
            }
            other => Err(ApiError::Internal(format!(
                "unknown writable field: {other}"
            ))),
        }
    }
}
