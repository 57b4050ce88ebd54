//! HTTP handlers for the treasure and user resources
//!
//! Every collection route runs the same pipeline: implicit filters (the
//! nested route's owner scope) → declared query filters → pagination →
//! context projection. Write routes apply the payload to a working copy,
//! validate, and only persist when the violation list is empty.

use crate::core::error::ApiError;
use crate::core::filter::apply_filters;
use crate::core::projection::{
    self, project, Context, TREASURE_COLLECTION, TREASURE_ITEM, TREASURE_WRITE_CTX, USER_READ_CTX,
    USER_WRITE_CTX,
};
use crate::core::query::{paginate, ListQuery, PaginatedResponse};
use crate::core::store::Repository;
use crate::entities::treasure::{Treasure, TREASURE_FILTERS};
use crate::entities::user::{User, USER_FILTERS};
use crate::storage::InMemoryRepository;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A projected record as it goes on the wire
pub type Projected = IndexMap<String, Value>;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn Repository<User>>,
    pub treasures: Arc<dyn Repository<Treasure>>,
}

impl AppState {
    /// State backed by fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::new()),
            treasures: Arc::new(InMemoryRepository::new()),
        }
    }
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "hoard"
    }))
}

// =============================================================================
// Treasure routes
// =============================================================================

pub async fn list_treasures(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Projected>>, ApiError> {
    let response = treasure_collection(&state, params, None).await?;
    Ok(Json(response))
}

pub async fn get_treasure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Projected>, ApiError> {
    let treasure = find_treasure(&state, &id).await?;
    Ok(Json(project(&treasure, TREASURE_ITEM, None)))
}

pub async fn create_treasure(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Projected>), ApiError> {
    // The constructor requires a name; the projector then applies the
    // full payload, name included, under the write context.
    let name = payload.get("name").and_then(Value::as_str).unwrap_or_default();
    let mut treasure = Treasure::new(name);
    projection::apply(&mut treasure, &payload, TREASURE_WRITE_CTX)?;

    validate_treasure(&state, &treasure).await?;
    state.treasures.save(treasure.clone(), true).await?;

    tracing::debug!(id = %treasure.id, "treasure created");
    Ok((StatusCode::CREATED, Json(project(&treasure, TREASURE_COLLECTION, None))))
}

/// Shared by PUT and PATCH; both use the same write context
pub async fn update_treasure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Json<Projected>, ApiError> {
    // Work on a copy so a rejected write leaves no partial mutation
    let mut treasure = find_treasure(&state, &id).await?;
    projection::apply(&mut treasure, &payload, TREASURE_WRITE_CTX)?;

    validate_treasure(&state, &treasure).await?;
    state.treasures.save(treasure.clone(), true).await?;

    Ok(Json(project(&treasure, TREASURE_COLLECTION, None)))
}

pub async fn delete_treasure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    find_treasure(&state, &id).await?;
    state.treasures.remove(&id, true).await?;

    tracing::debug!(id = %id, "treasure deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Nested collection: the link variable becomes an implicit exact-match
/// owner filter applied before the declared query filters
pub async fn list_user_treasures(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Projected>>, ApiError> {
    let user = find_user(&state, &user_id).await?;
    let response = treasure_collection(&state, params, Some(user.id)).await?;
    Ok(Json(response))
}

// =============================================================================
// User routes
// =============================================================================

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedResponse<Projected>>, ApiError> {
    let query = ListQuery::from_params(params);
    let users = state.users.find_all().await?;
    let filtered = apply_filters(users, USER_FILTERS, &query.filters, |user, param| {
        user.filter_value(param)
    });
    let (page_items, pagination) = paginate(filtered, query.page);
    let data = project_page(&page_items, USER_READ_CTX, &query);

    Ok(Json(PaginatedResponse { data, pagination }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Projected>, ApiError> {
    let user = find_user(&state, &id).await?;
    Ok(Json(project(&user, USER_READ_CTX, None)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Projected>), ApiError> {
    let mut user = User::new("");
    projection::apply(&mut user, &payload, USER_WRITE_CTX)?;

    let violations = user.validate();
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }
    state.users.save(user.clone(), true).await?;

    tracing::debug!(id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(project(&user, USER_READ_CTX, None))))
}

// =============================================================================
// Shared pipeline pieces
// =============================================================================

async fn treasure_collection(
    state: &AppState,
    params: HashMap<String, String>,
    implicit_owner: Option<Uuid>,
) -> Result<PaginatedResponse<Projected>, ApiError> {
    let query = ListQuery::from_params(params);

    let mut treasures = state.treasures.find_all().await?;
    if let Some(owner_id) = implicit_owner {
        treasures.retain(|t| t.owner_id == Some(owner_id));
    }

    let owners = owners_by_id(state).await?;
    let filtered = apply_filters(
        treasures,
        TREASURE_FILTERS,
        &query.filters,
        |treasure, param| treasure.filter_value(param, &owners),
    );

    let (page_items, pagination) = paginate(filtered, query.page);
    let data = project_page(&page_items, TREASURE_COLLECTION, &query);

    Ok(PaginatedResponse { data, pagination })
}

fn project_page<T: crate::core::entity::Projectable>(
    items: &[T],
    ctx: Context,
    query: &ListQuery,
) -> Vec<Projected> {
    items
        .iter()
        .map(|item| project(item, ctx, query.properties.as_ref()))
        .collect()
}

/// Committed users keyed by id, for owner relationship traversal
async fn owners_by_id(state: &AppState) -> Result<HashMap<Uuid, User>, ApiError> {
    let users = state.users.find_all().await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

async fn find_treasure(state: &AppState, id: &Uuid) -> Result<Treasure, ApiError> {
    state
        .treasures
        .find(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "treasure",
            id: *id,
        })
}

async fn find_user(state: &AppState, id: &Uuid) -> Result<User, ApiError> {
    state.users.find(id).await?.ok_or(ApiError::NotFound {
        resource: "user",
        id: *id,
    })
}

/// Resolve the owner reference and run full validation; the write is
/// rejected as a whole when any violation remains
async fn validate_treasure(state: &AppState, treasure: &Treasure) -> Result<(), ApiError> {
    let owner = match treasure.owner_id {
        Some(owner_id) => state.users.find(&owner_id).await?,
        None => None,
    };

    let violations = treasure.validate(owner.as_ref());
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations))
    }
}
