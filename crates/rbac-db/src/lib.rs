//! # rbac-db
//!
//! Data-access layer for the RBAC admin service layer.
//!
//! - [`Repository`]: generic CRUD contract every entity store implements
//! - Lookup traits for the specialized queries some services need
//! - [`MemoryRepository`]: in-process store with row-version checks
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rbac_db::{MemoryRepository, Repository};
//! use rbac_models::Role;
//!
//! let roles = Arc::new(MemoryRepository::<Role>::new());
//! let saved = roles.create(role).await?;
//! let found = roles.get_by_id(saved.id).await?;
//! ```

pub mod repository;
pub mod lookups;
pub mod memory;

pub use repository::{Repository, RepositoryError, RepositoryResult};
pub use lookups::{
    AccessLogRepository, BillRepository, ModuleFormRepository, PersonRepository,
    RoleFormPermissionRepository, RoleUserRepository, StateInfractionRepository,
    UserNotificationRepository,
};
pub use memory::MemoryRepository;
