//! Treasure entity: the resource this API exists to expose
//!
//! Field visibility is declared once in [`TREASURE_FIELDS`]. The wire name
//! `description` appears twice: the read entry returns the stored text and
//! the write entry binds to [`Treasure::set_text_description`], which runs
//! every incoming write through the line-break transformation. Input is
//! always treated as raw untransformed text.

use crate::core::entity::{Entity, Projectable};
use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterSpec, Strategy};
use crate::core::projection::{self, FieldSpec};
use crate::core::validation::{validators, Violation};
use crate::entities::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

const SHORT_DESCRIPTION_CHARS: usize = 40;

/// Declared filterable parameters for treasure collections.
///
/// `owner.username` traverses the owner relationship; `owner` matches the
/// owner's identifier exactly.
pub static TREASURE_FILTERS: &[FilterSpec] = &[
    FilterSpec {
        param: "name",
        strategy: Strategy::Partial,
    },
    FilterSpec {
        param: "owner.username",
        strategy: Strategy::Partial,
    },
    FilterSpec {
        param: "owner",
        strategy: Strategy::Exact,
    },
    FilterSpec {
        param: "isPublished",
        strategy: Strategy::Boolean,
    },
];

static TREASURE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        wire: "id",
        key: "id",
        read_groups: &[projection::TREASURE_READ, projection::USER_READ],
        write_groups: &[],
    },
    FieldSpec {
        wire: "name",
        key: "name",
        read_groups: &[projection::TREASURE_READ, projection::USER_READ],
        write_groups: &[projection::TREASURE_WRITE, projection::USER_WRITE],
    },
    FieldSpec {
        wire: "description",
        key: "description",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[],
    },
    // Same wire name, different setter: writes run through nl2br.
    FieldSpec {
        wire: "description",
        key: "text_description",
        read_groups: &[],
        write_groups: &[projection::TREASURE_WRITE, projection::USER_WRITE],
    },
    FieldSpec {
        wire: "shortDescription",
        key: "short_description",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[],
    },
    FieldSpec {
        wire: "value",
        key: "value",
        read_groups: &[projection::TREASURE_READ, projection::USER_READ],
        write_groups: &[projection::TREASURE_WRITE, projection::USER_WRITE],
    },
    FieldSpec {
        wire: "coolfactor",
        key: "coolfactor",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[projection::TREASURE_WRITE],
    },
    FieldSpec {
        wire: "createdAtAgo",
        key: "created_at_ago",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[],
    },
    FieldSpec {
        wire: "isPublished",
        key: "is_published",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[],
    },
    FieldSpec {
        wire: "owner",
        key: "owner",
        read_groups: &[projection::TREASURE_READ],
        write_groups: &[projection::TREASURE_WRITE],
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub value: i64,
    pub coolfactor: i64,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
    /// Foreign key to the owning user, fetched explicitly; required for a
    /// valid treasure but optional in memory until the write is validated
    pub owner_id: Option<Uuid>,
}

impl Treasure {
    /// Construct a treasure, stamping `created_at` once
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            value: 0,
            coolfactor: 0,
            created_at: Utc::now(),
            is_published: false,
            owner_id: None,
        }
    }

    /// Store a description, converting line breaks to explicit `<br />`
    /// markers. The transformation is not reversible; `raw` is always the
    /// untransformed user input.
    pub fn set_text_description(&mut self, raw: &str) {
        self.description = nl2br(raw);
    }

    /// First 40 characters of the description plus an ellipsis marker.
    /// Safe for descriptions shorter than 40 characters.
    pub fn short_description(&self) -> String {
        let truncated: String = self.description.chars().take(SHORT_DESCRIPTION_CHARS).collect();
        format!("{}...", truncated)
    }

    /// Human-relative rendering of `created_at`, recomputed per read
    pub fn created_at_ago(&self) -> String {
        ago(self.created_at, Utc::now())
    }

    /// Check every declared constraint against the current state.
    ///
    /// `owner` is the resolved user behind `owner_id` (or `None` when the
    /// reference is absent or dangling); its own validation is re-checked
    /// one level deep.
    pub fn validate(&self, owner: Option<&User>) -> Vec<Violation> {
        let mut violations = Vec::new();
        violations.extend(validators::not_blank("name", &self.name));
        violations.extend(validators::length("name", &self.name, 2, 50));
        violations.extend(validators::not_blank("description", &self.description));
        violations.extend(validators::min_value("value", self.value, 0));
        violations.extend(validators::range("coolfactor", self.coolfactor, 0, 900));

        match (self.owner_id, owner) {
            (None, _) => violations.push(Violation::new(
                "owner",
                "invalid",
                "'owner' is required",
            )),
            (Some(id), None) => violations.push(Violation::new(
                "owner",
                "invalid",
                format!("'owner' references an unknown user ({id})"),
            )),
            (Some(_), Some(user)) => {
                if !user.validate().is_empty() {
                    violations.push(Violation::new(
                        "owner",
                        "invalid",
                        "'owner' references an invalid user",
                    ));
                }
            }
        }
        violations
    }

    /// Resolve a declared filter parameter to a comparable field value.
    ///
    /// `owners` is the committed user set, keyed by id, for relationship
    /// traversal. A dangling owner reference resolves to `None` and the
    /// treasure drops out of owner-based filters.
    pub fn filter_value(&self, param: &str, owners: &HashMap<Uuid, User>) -> Option<FieldValue> {
        match param {
            "name" => Some(FieldValue::String(self.name.clone())),
            "owner" => self.owner_id.map(FieldValue::Uuid),
            "owner.username" => self
                .owner_id
                .and_then(|id| owners.get(&id))
                .map(|user| FieldValue::String(user.username.clone())),
            "isPublished" => Some(FieldValue::Boolean(self.is_published)),
            _ => None,
        }
    }
}

impl Entity for Treasure {
    fn resource_name() -> &'static str {
        "treasures"
    }

    fn resource_name_singular() -> &'static str {
        "treasure"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Projectable for Treasure {
    fn schema() -> &'static [FieldSpec] {
        TREASURE_FIELDS
    }

    fn read_field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::String(self.id.to_string())),
            "name" => Some(Value::String(self.name.clone())),
            "description" => Some(Value::String(self.description.clone())),
            "short_description" => Some(Value::String(self.short_description())),
            "value" => Some(Value::from(self.value)),
            "coolfactor" => Some(Value::from(self.coolfactor)),
            "created_at_ago" => Some(Value::String(self.created_at_ago())),
            "is_published" => Some(Value::Bool(self.is_published)),
            "owner" => Some(match self.owner_id {
                Some(id) => Value::String(id.to_string()),
                None => Value::Null,
            }),
            _ => None,
        }
    }

    fn write_field(&mut self, key: &str, value: &Value) -> Result<(), ApiError> {
        match key {
            "name" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| ApiError::BadRequest("'name' must be a string".to_string()))?;
                self.name = s.to_string();
                Ok(())
            }
            "text_description" => {
                let s = value.as_str().ok_or_else(|| {
                    ApiError::BadRequest("'description' must be a string".to_string())
                })?;
                self.set_text_description(s);
                Ok(())
            }
            "value" => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| ApiError::BadRequest("'value' must be an integer".to_string()))?;
                self.value = n;
                Ok(())
            }
            "coolfactor" => {
                let n = value.as_i64().ok_or_else(|| {
                    ApiError::BadRequest("'coolfactor' must be an integer".to_string())
                })?;
                self.coolfactor = n;
                Ok(())
            }
            "owner" => {
                let s = value.as_str().ok_or_else(|| {
                    ApiError::BadRequest("'owner' must be a user id string".to_string())
                })?;
                let id = Uuid::parse_str(s).map_err(|_| {
                    ApiError::BadRequest("'owner' must be a valid UUID".to_string())
                })?;
                self.owner_id = Some(id);
                Ok(())
            }
            other => Err(ApiError::Internal(format!(
                "unknown writable field: {other}"
            ))),
        }
    }
}

/// Convert line breaks to explicit `<br />` markers, keeping the original
/// break so preformatted output still wraps
fn nl2br(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                out.push_str("<br />\r");
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    out.push('\n');
                }
            }
            '\n' => out.push_str("<br />\n"),
            other => out.push(other),
        }
    }
    out
}

/// Human-relative age ("3 days ago"), coarsest unit that fits
fn ago(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - from).num_seconds().max(1);

    let (count, unit) = if seconds < 60 {
        (seconds, "second")
    } else if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else if seconds < 2_592_000 {
        (seconds / 86_400, "day")
    } else if seconds < 31_536_000 {
        (seconds / 2_592_000, "month")
    } else {
        (seconds / 31_536_000, "year")
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
