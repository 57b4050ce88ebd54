//! Repository trait: the data-access facade handlers talk to
//!
//! `save` and `remove` take an explicit `flush` flag. With `flush: false`
//! the change is only staged into the repository's unit of work; nothing
//! is visible to reads until `flush()` commits the staged queue. Fixture
//! loading stages many entities and flushes once; request handlers flush
//! per operation.

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Generic data-access facade for one entity type.
///
/// The backing store provides its own concurrency control; this trait
/// carries no locking semantics of its own.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find a committed entity by id
    async fn find(&self, id: &Uuid) -> Result<Option<T>>;

    /// All committed entities, in stable creation order
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Stage an insert-or-replace; commit immediately when `flush` is set
    async fn save(&self, entity: T, flush: bool) -> Result<()>;

    /// Stage a removal; commit immediately when `flush` is set.
    ///
    /// Removing an unknown id is a no-op at this level; surfacing 404s is
    /// the router's concern.
    async fn remove(&self, id: &Uuid, flush: bool) -> Result<()>;

    /// Commit every staged change, in staging order
    async fn flush(&self) -> Result<()>;
}
