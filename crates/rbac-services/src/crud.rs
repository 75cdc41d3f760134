//! Generic CRUD service
//!
//! Every entity service is a [`CrudService`] parameterized by an
//! [`EntityDefinition`]. The flow of each operation is the same for all
//! kinds: contract check, store call, mapping, logging.

use std::sync::Arc;

use chrono::Utc;
use rbac_contracts::{check_id, ValidationErrors, WriteMode};
use rbac_core::config::AppConfig;
use rbac_core::error::ServiceError;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_core::traits::{ActiveFlag, Dto, Entity, Id, Identifiable, Versioned};
use rbac_db::{Repository, RepositoryError};
use tracing::{debug, error, info, instrument, warn};

use crate::definition::EntityDefinition;
use crate::guard::WriteGuard;

pub struct CrudService<D: EntityDefinition> {
    repo: Arc<dyn Repository<D::Entity>>,
    list_filter: ListFilter,
    guards: Vec<Arc<dyn WriteGuard<D::Entity>>>,
}

impl<D: EntityDefinition> Clone for CrudService<D> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            list_filter: self.list_filter,
            guards: self.guards.clone(),
        }
    }
}

impl<D: EntityDefinition> CrudService<D> {
    const NAME: &'static str = <D::Entity as Entity>::TYPE_NAME;

    pub fn new(repo: Arc<dyn Repository<D::Entity>>) -> Self {
        Self {
            repo,
            list_filter: D::DEFAULT_LIST_FILTER,
            guards: Vec::new(),
        }
    }

    /// Override the list visibility policy.
    ///
    /// `ActiveOnly` is rejected for entities without an active flag.
    pub fn with_list_filter(mut self, filter: ListFilter) -> ServiceResult<Self> {
        if filter == ListFilter::ActiveOnly && !<D::Entity as Entity>::HAS_ACTIVE_FLAG {
            error!(entity = Self::NAME, "ActiveOnly list filter on entity without active flag");
            return Err(ServiceError::business_rule(
                "list_filter_unsupported",
                format!("{} has no active flag to filter on", Self::NAME),
            ));
        }
        self.list_filter = filter;
        Ok(self)
    }

    /// Apply the configured policy override for this entity, if any
    pub fn with_config(self, config: &AppConfig) -> ServiceResult<Self> {
        match config.policy_for(Self::NAME) {
            Some(filter) => self.with_list_filter(filter),
            None => Ok(self),
        }
    }

    pub fn with_guard(mut self, guard: Arc<dyn WriteGuard<D::Entity>>) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn list_filter(&self) -> ListFilter {
        self.list_filter
    }

    /// Store handle, for specialized operations built on top of CRUD
    pub fn repository(&self) -> &Arc<dyn Repository<D::Entity>> {
        &self.repo
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<D::Dto>> {
        let rows = self
            .repo
            .get_all()
            .await
            .map_err(|e| self.store_failure("list", e))?;

        let dtos: Vec<D::Dto> = rows
            .iter()
            .filter(|row| self.list_filter.admits(row.active_flag()))
            .map(D::to_dto)
            .collect();
        debug!(entity = Self::NAME, total = rows.len(), visible = dtos.len(), "Listed");
        Ok(dtos)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Id) -> ServiceResult<D::Dto> {
        self.require_id(id)?;
        let entity = self.fetch(id, "get").await?;
        Ok(D::to_dto(&entity))
    }

    #[instrument(skip_all)]
    pub async fn create(&self, dto: D::Dto) -> ServiceResult<D::Dto> {
        D::validate(&dto, WriteMode::Create).map_err(|e| self.invalid(e))?;

        let entity = D::new_entity(&dto, Utc::now());
        D::validate_merged(&entity).map_err(|e| self.invalid(e))?;
        self.run_guards(&entity).await?;

        let saved = self
            .repo
            .create(entity)
            .await
            .map_err(|e| self.store_failure("create", e))?;
        info!(entity = Self::NAME, id = saved.id(), "Created");
        Ok(D::to_dto(&saved))
    }

    /// Replace the writable fields of the row identified by `dto.id`.
    ///
    /// A non-zero `dto.row_version` must match the stored version.
    #[instrument(skip_all, fields(id = dto.id()))]
    pub async fn update(&self, dto: D::Dto) -> ServiceResult<D::Dto> {
        let id = dto.id();
        self.require_id(id)?;
        D::validate(&dto, WriteMode::Update).map_err(|e| self.invalid(e))?;

        let mut entity = self.fetch(id, "update").await?;
        let expected = dto.row_version();
        if expected != 0 && expected != entity.row_version() {
            warn!(
                entity = Self::NAME,
                id,
                expected,
                current = entity.row_version(),
                "Stale update rejected"
            );
            return Err(ServiceError::Conflict {
                entity: Self::NAME,
                id,
            });
        }

        D::apply_update(&mut entity, &dto);
        self.write_back(entity, "update").await
    }

    /// Apply only the fields present in `patch`
    #[instrument(skip(self, patch))]
    pub async fn patch(&self, id: Id, patch: D::Patch) -> ServiceResult<D::Dto> {
        self.require_id(id)?;
        D::validate_patch(&patch).map_err(|e| self.invalid(e))?;

        let mut entity = self.fetch(id, "patch").await?;
        D::apply_patch(&mut entity, &patch);
        self.write_back(entity, "patch").await
    }

    /// Hard delete. Returns the row as it was before removal.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> ServiceResult<D::Dto> {
        self.require_id(id)?;
        let entity = self.fetch(id, "delete").await?;

        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|e| self.store_failure("delete", e))?;
        if !removed {
            error!(entity = Self::NAME, id, "Store reported nothing deleted");
            return Err(ServiceError::external(format!(
                "{} {} was not deleted",
                Self::NAME,
                id
            )));
        }

        info!(entity = Self::NAME, id, "Deleted");
        Ok(D::to_dto(&entity))
    }

    async fn write_back(&self, mut entity: D::Entity, operation: &str) -> ServiceResult<D::Dto> {
        D::validate_merged(&entity).map_err(|e| self.invalid(e))?;
        self.run_guards(&entity).await?;

        let id = entity.id();
        let updated = self
            .repo
            .update(&entity)
            .await
            .map_err(|e| self.store_failure(operation, e))?;
        if !updated {
            error!(entity = Self::NAME, id, operation, "Store reported nothing updated");
            return Err(ServiceError::external(format!(
                "{} {} was not updated",
                Self::NAME,
                id
            )));
        }

        // the store bumps the version on every successful update
        entity.set_row_version(entity.row_version() + 1);
        info!(entity = Self::NAME, id, operation, "Updated");
        Ok(D::to_dto(&entity))
    }

    pub(crate) async fn fetch(&self, id: Id, operation: &str) -> ServiceResult<D::Entity> {
        match self.repo.get_by_id(id).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => {
                info!(entity = Self::NAME, id, operation, "Not found");
                Err(ServiceError::not_found(Self::NAME, id))
            }
            Err(e) => Err(self.store_failure(operation, e)),
        }
    }

    async fn run_guards(&self, entity: &D::Entity) -> ServiceResult<()> {
        for guard in &self.guards {
            if let Err(err) = guard.check(entity).await {
                self.log_failure(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    pub(crate) fn require_id(&self, id: Id) -> ServiceResult<()> {
        check_id("id", id).map_err(|e| self.invalid(e))
    }

    pub(crate) fn invalid(&self, errors: ValidationErrors) -> ServiceError {
        let err = ServiceError::from(errors);
        self.log_failure(&err);
        err
    }

    pub(crate) fn store_failure(&self, operation: &str, err: RepositoryError) -> ServiceError {
        let err = match err {
            RepositoryError::Conflict { id, .. } => ServiceError::Conflict {
                entity: Self::NAME,
                id,
            },
            other => ServiceError::external_with_source(
                format!("{} {} failed", Self::NAME, operation),
                other,
            ),
        };
        self.log_failure(&err);
        err
    }

    fn log_failure(&self, err: &ServiceError) {
        match err {
            ServiceError::Validation { field, message } => {
                warn!(entity = Self::NAME, field = %field, message = %message, "Validation failed");
            }
            ServiceError::NotFound { id, .. } => {
                info!(entity = Self::NAME, id, "Not found");
            }
            ServiceError::Conflict { id, .. } => {
                warn!(entity = Self::NAME, id, "Concurrent modification");
            }
            ServiceError::ExternalService { .. } | ServiceError::BusinessRuleViolation { .. } => {
                error!(entity = Self::NAME, error = %err, "Operation failed");
            }
        }
    }
}

impl<D> CrudService<D>
where
    D: EntityDefinition,
    D::Entity: ActiveFlag,
{
    /// Soft delete (`false`) or restore (`true`)
    #[instrument(skip(self))]
    pub async fn set_active_status(&self, id: Id, is_active: bool) -> ServiceResult<D::Dto> {
        self.require_id(id)?;
        let mut entity = self.fetch(id, "set_active_status").await?;
        entity.set_active(is_active);
        self.write_back(entity, "set_active_status").await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use rbac_db::{MemoryRepository, RepositoryResult};
    use rbac_models::{Role, RoleDto, RolePatch};

    use crate::access::RoleDefinition;

    mock! {
        pub RoleStore {}

        #[async_trait]
        impl Repository<Role> for RoleStore {
            async fn get_all(&self) -> RepositoryResult<Vec<Role>>;
            async fn get_by_id(&self, id: Id) -> RepositoryResult<Option<Role>>;
            async fn create(&self, entity: Role) -> RepositoryResult<Role>;
            async fn update(&self, entity: &Role) -> RepositoryResult<bool>;
            async fn delete(&self, id: Id) -> RepositoryResult<bool>;
        }
    }

    fn role_dto(name: &str) -> RoleDto {
        RoleDto {
            role_name: name.to_string(),
            description: "test role".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn stored_role(id: Id) -> Role {
        let mut role = Role::from_dto(&role_dto("admin"), Utc::now());
        role.id = id;
        role.row_version = 1;
        role
    }

    fn memory_service() -> CrudService<RoleDefinition> {
        CrudService::new(Arc::new(MemoryRepository::<Role>::new()))
    }

    #[tokio::test]
    async fn test_get_invalid_id_never_touches_store() {
        let mut store = MockRoleStore::new();
        store.expect_get_by_id().never();
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        for id in [0, -1] {
            let err = service.get(id).await.unwrap_err();
            assert_eq!(err.field(), Some("id"));
        }
    }

    #[tokio::test]
    async fn test_get_missing_looks_up_once() {
        let mut store = MockRoleStore::new();
        store.expect_get_by_id().times(1).returning(|_| Ok(None));
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let err = service.get(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Role", id: 42 }));
    }

    #[tokio::test]
    async fn test_create_invalid_never_writes() {
        let mut store = MockRoleStore::new();
        store.expect_create().never();
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let err = service.create(role_dto("  ")).await.unwrap_err();
        assert_eq!(err.field(), Some("role_name"));
    }

    #[tokio::test]
    async fn test_create_writes_once_and_returns_store_id() {
        let mut store = MockRoleStore::new();
        store.expect_create().times(1).returning(|mut role| {
            role.id = 17;
            role.row_version = 1;
            Ok(role)
        });
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let created = service.create(role_dto("auditor")).await.unwrap();
        assert_eq!(created.id, 17);
        assert_eq!(created.role_name, "auditor");
    }

    #[tokio::test]
    async fn test_store_failure_is_external() {
        let mut store = MockRoleStore::new();
        store
            .expect_get_all()
            .returning(|| Err(RepositoryError::Storage("connection reset".to_string())));
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let err = service.list().await.unwrap_err();
        match err {
            ServiceError::ExternalService { service, source, .. } => {
                assert_eq!(service, "database");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_missing_never_writes() {
        let mut store = MockRoleStore::new();
        store.expect_get_by_id().times(1).returning(|_| Ok(None));
        store.expect_update().never();
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let dto = RoleDto {
            id: 9,
            ..role_dto("admin")
        };
        assert!(service.update(dto).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_patch_missing_never_writes() {
        let mut store = MockRoleStore::new();
        store.expect_get_by_id().times(1).returning(|_| Ok(None));
        store.expect_update().never();
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let err = service
            .patch(9, RolePatch::new().with_description("x"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_false_is_external() {
        let mut store = MockRoleStore::new();
        store
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_role(id))));
        store.expect_update().times(1).returning(|_| Ok(false));
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let dto = RoleDto {
            id: 3,
            ..role_dto("admin")
        };
        let err = service.update(dto).await.unwrap_err();
        assert!(matches!(err, ServiceError::ExternalService { .. }));
    }

    #[tokio::test]
    async fn test_delete_false_is_external() {
        let mut store = MockRoleStore::new();
        store
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_role(id))));
        store.expect_delete().times(1).returning(|_| Ok(false));
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        assert!(!service.delete(3).await.unwrap_err().is_domain());
    }

    #[tokio::test]
    async fn test_stale_dto_conflicts_without_write() {
        let mut store = MockRoleStore::new();
        store.expect_get_by_id().returning(|id| {
            let mut role = stored_role(id);
            role.row_version = 4;
            Ok(Some(role))
        });
        store.expect_update().never();
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let dto = RoleDto {
            id: 3,
            row_version: 2,
            ..role_dto("admin")
        };
        let err = service.update(dto).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { entity: "Role", id: 3 }));
    }

    #[tokio::test]
    async fn test_store_conflict_maps_to_conflict() {
        let mut store = MockRoleStore::new();
        store
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_role(id))));
        store.expect_update().returning(|role| {
            Err(RepositoryError::Conflict {
                entity: "Role",
                id: role.id,
                expected: 1,
                current: 2,
            })
        });
        let service = CrudService::<RoleDefinition>::new(Arc::new(store));

        let err = service
            .patch(3, RolePatch::new().with_active(false))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_round_trip_through_memory_store() {
        let service = memory_service();
        let created = service.create(role_dto("admin")).await.unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let updated = service
            .update(RoleDto {
                description: "Full access".to_string(),
                ..fetched.clone()
            })
            .await
            .unwrap();
        assert_eq!(updated.description, "Full access");
        assert_eq!(updated.row_version, fetched.row_version + 1);
        assert_eq!(service.get(created.id).await.unwrap(), updated);

        let deleted = service.delete(created.id).await.unwrap();
        assert_eq!(deleted, updated);
        assert!(service.get(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_second_writer_with_old_version_conflicts() {
        let service = memory_service();
        let created = service.create(role_dto("admin")).await.unwrap();

        service
            .update(RoleDto {
                role_name: "root".to_string(),
                ..created.clone()
            })
            .await
            .unwrap();

        let err = service
            .update(RoleDto {
                role_name: "superuser".to_string(),
                ..created
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_mapping_is_stable() {
        let service = memory_service();
        let created = service.create(role_dto("admin")).await.unwrap();

        let entity = service.fetch(created.id, "test").await.unwrap();
        let first = RoleDefinition::to_dto(&entity);
        let mut rebuilt = RoleDefinition::new_entity(&first, entity.created_at);
        rebuilt.id = entity.id;
        rebuilt.row_version = entity.row_version;
        assert_eq!(RoleDefinition::to_dto(&rebuilt), first);
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore() {
        let service = memory_service();
        let created = service.create(role_dto("admin")).await.unwrap();

        let hidden = service.set_active_status(created.id, false).await.unwrap();
        assert!(!hidden.is_active);
        assert!(service.list().await.unwrap().is_empty());

        service.set_active_status(created.id, true).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[test]
    fn test_config_override_applies() {
        let mut config = AppConfig::default();
        config
            .policies
            .insert("role".to_string(), ListFilter::All);

        let service = memory_service().with_config(&config).unwrap();
        assert_eq!(service.list_filter(), ListFilter::All);
    }
}
