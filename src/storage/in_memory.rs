//! In-memory repository with an explicit unit of work
//!
//! Backs the development server and the test suite. Committed state lives
//! in a `RwLock<HashMap>`; staged changes sit in a separate pending queue
//! until `flush()` applies them in staging order. Reads only ever see
//! committed state.

use crate::core::entity::Entity;
use crate::core::store::Repository;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// A staged, not-yet-committed change
enum Pending<T> {
    Save(T),
    Remove(Uuid),
}

/// In-memory repository implementation
#[derive(Clone)]
pub struct InMemoryRepository<T: Entity> {
    committed: Arc<RwLock<HashMap<Uuid, T>>>,
    pending: Arc<RwLock<Vec<Pending<T>>>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            committed: Arc::new(RwLock::new(HashMap::new())),
            pending: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of staged, uncommitted changes
    pub fn pending_len(&self) -> usize {
        self.pending.read().map(|p| p.len()).unwrap_or(0)
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find(&self, id: &Uuid) -> Result<Option<T>> {
        let committed = self
            .committed
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(committed.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let committed = self
            .committed
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut entities: Vec<T> = committed.values().cloned().collect();
        // Stable ordering so pagination does not shuffle between requests
        entities.sort_by_key(|e| (e.created_at(), e.id()));
        Ok(entities)
    }

    async fn save(&self, entity: T, flush: bool) -> Result<()> {
        {
            let mut pending = self
                .pending
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            pending.push(Pending::Save(entity));
        }

        if flush {
            self.flush().await?;
        }
        Ok(())
    }

    async fn remove(&self, id: &Uuid, flush: bool) -> Result<()> {
        {
            let mut pending = self
                .pending
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            pending.push(Pending::Remove(*id));
        }

        if flush {
            self.flush().await?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let staged: Vec<Pending<T>> = {
            let mut pending = self
                .pending
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            pending.drain(..).collect()
        };

        let mut committed = self
            .committed
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        for change in staged {
            match change {
                Pending::Save(entity) => {
                    committed.insert(entity.id(), entity);
                }
                Pending::Remove(id) => {
                    committed.remove(&id);
                }
            }
        }
        Ok(())
    }
}
