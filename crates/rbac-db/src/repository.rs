//! Repository traits
//!
//! Generic CRUD contract consumed by the service layer.

use async_trait::async_trait;
use rbac_core::traits::{Entity, Id};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Conflict: {entity} {id} is at version {current}, write was based on {expected}")]
    Conflict {
        entity: &'static str,
        id: Id,
        expected: i64,
        current: i64,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict { .. })
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All rows, active or not
    async fn get_all(&self) -> RepositoryResult<Vec<T>>;

    async fn get_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// Persist a new row. The store assigns `id` and the first row version.
    async fn create(&self, entity: T) -> RepositoryResult<T>;

    /// Replace a stored row.
    ///
    /// Returns `false` when no row has the entity's id. A non-zero
    /// `row_version` that differs from the stored one is a
    /// [`RepositoryError::Conflict`].
    async fn update(&self, entity: &T) -> RepositoryResult<bool>;

    /// Remove a row; `false` when nothing was removed
    async fn delete(&self, id: Id) -> RepositoryResult<bool>;
}
