//! # Hoard
//!
//! A CRUD resource API for treasures and the users who own them, built
//! around a small generic resource-exposure engine:
//!
//! - **Visibility projection**: every field's read/write group membership
//!   is declared once in a static schema table; projection contexts
//!   (collection read, item read, write) only look memberships up.
//! - **Declarative filters**: collections accept exact, partial and
//!   boolean query-parameter filters, including relationship traversal
//!   (`owner.username`); undeclared parameters are ignored.
//! - **Fixed pagination**: 10 items per page, page past the end returns
//!   an empty list with the correct total.
//! - **Nested routing**: `/users/{user_id}/treasures` materializes the
//!   link variable as an implicit owner filter in front of the pipeline.
//! - **Unit of work**: repositories stage changes and commit on flush,
//!   so fixture loading batches 50 entities into two commits.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hoard::prelude::*;
//!
//! let state = AppState::in_memory();
//! hoard::fixtures::load(state.users.as_ref(), state.treasures.as_ref()).await?;
//! hoard::server::serve(state, "127.0.0.1:3000").await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod fixtures;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Entity, Projectable},
        error::{ApiError, ErrorResponse},
        field::{FieldFormat, FieldValue},
        filter::{apply_filters, FilterSpec, Strategy},
        projection::{apply, project, Context, FieldSpec},
        query::{paginate, ListQuery, PaginatedResponse, PaginationMeta, ITEMS_PER_PAGE},
        store::Repository,
        validation::Violation,
    };

    // === Entities ===
    pub use crate::entities::{Treasure, User, TREASURE_FILTERS, USER_FILTERS};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{build_router, serve, AppState};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
