//! Core traits shared by every persisted entity
//!
//! These replace runtime property lookup: a service knows at compile time
//! whether an entity has an identity and whether it carries an active flag.

use chrono::{DateTime, Utc};

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a surrogate key
pub trait Identifiable {
    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);

    /// Ids are assigned by the store; zero means not yet persisted
    fn is_persisted(&self) -> bool {
        self.id() > 0
    }
}

/// Trait for entities carrying an optimistic-concurrency token
pub trait Versioned {
    fn row_version(&self) -> i64;
    fn set_row_version(&mut self, version: i64);
}

/// Trait for entities with a server-side creation timestamp
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
}

/// Base trait for all persisted entities
pub trait Entity: Identifiable + Versioned + Timestamped + Clone + Send + Sync + 'static {
    /// Human-readable type name for error messages and logs
    const TYPE_NAME: &'static str;

    /// Whether the entity implements [`ActiveFlag`]
    const HAS_ACTIVE_FLAG: bool = false;

    /// Current value of the active flag, if the entity has one
    fn active_flag(&self) -> Option<bool> {
        None
    }
}

/// Transport shape of an entity
pub trait Dto: Clone + Send + Sync + 'static {
    fn id(&self) -> Id;

    /// Version the caller last read; `0` skips the staleness check
    fn row_version(&self) -> i64;
}

/// Trait for soft-deletable entities (visibility toggled instead of row removal)
pub trait ActiveFlag: Entity {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}
