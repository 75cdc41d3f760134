//! Specialized lookups beyond plain CRUD
//!
//! Each trait is implemented by the store that owns the entity. Services that
//! need a lookup hold the store twice: once as `dyn Repository<T>` and once
//! as the lookup trait object.

use async_trait::async_trait;
use rbac_core::traits::Id;
use rbac_models::{
    AccessLog, Bill, ModuleForm, Person, RoleFormPermission, RoleUser, StateInfraction,
    UserNotification,
};

use crate::repository::RepositoryResult;

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn person_exists(&self, id: Id) -> RepositoryResult<bool>;

    /// Exact match on the trimmed document number
    async fn get_by_document_number(&self, document_number: &str)
        -> RepositoryResult<Option<Person>>;
}

#[async_trait]
pub trait StateInfractionRepository: Send + Sync {
    async fn get_by_person_ids(&self, person_ids: &[Id]) -> RepositoryResult<Vec<StateInfraction>>;
}

#[async_trait]
pub trait UserNotificationRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<UserNotification>>;
}

#[async_trait]
pub trait RoleUserRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<RoleUser>>;
}

#[async_trait]
pub trait RoleFormPermissionRepository: Send + Sync {
    async fn get_by_role_id(&self, role_id: Id) -> RepositoryResult<Vec<RoleFormPermission>>;
}

#[async_trait]
pub trait ModuleFormRepository: Send + Sync {
    async fn get_by_module_id(&self, module_id: Id) -> RepositoryResult<Vec<ModuleForm>>;
}

#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn get_by_barcode(&self, barcode: &str) -> RepositoryResult<Option<Bill>>;
}

#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Newest first
    async fn get_by_user_id(&self, user_id: Id) -> RepositoryResult<Vec<AccessLog>>;
}
