//! Access-control catalogue services
//!
//! Roles, permissions, forms, modules and the junction tables that tie them
//! together. `can` answers whether a role may perform an action on a form.

use std::ops::Deref;
use std::sync::Arc;

use rbac_contracts::{
    check_id, FormContract, ModuleContract, ModuleFormContract, PermissionContract, RoleContract,
    RoleFormPermissionContract, RoleUserContract,
};
use rbac_core::config::AppConfig;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_core::traits::Id;
use rbac_db::{ModuleFormRepository, Repository, RoleFormPermissionRepository, RoleUserRepository};
use rbac_models::{
    Form, FormAction, FormDto, FormPatch, Module, ModuleDto, ModuleForm, ModuleFormDto,
    ModuleFormPatch, ModulePatch, Permission, PermissionDto, PermissionPatch, Role, RoleDto,
    RoleFormPermission, RoleFormPermissionDto, RoleFormPermissionPatch, RolePatch, RoleUser,
    RoleUserDto, RoleUserPatch,
};
use tracing::debug;

use crate::crud::CrudService;
use crate::definition::{entity_definition, EntityDefinition};

entity_definition! {
    RoleDefinition {
        entity: Role,
        dto: RoleDto,
        patch: RolePatch,
        contract: RoleContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

entity_definition! {
    PermissionDefinition {
        entity: Permission,
        dto: PermissionDto,
        patch: PermissionPatch,
        contract: PermissionContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

entity_definition! {
    FormDefinition {
        entity: Form,
        dto: FormDto,
        patch: FormPatch,
        contract: FormContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

entity_definition! {
    /// Modules are listed for the admin screen, inactive ones included
    ModuleDefinition {
        entity: Module,
        dto: ModuleDto,
        patch: ModulePatch,
        contract: ModuleContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    ModuleFormDefinition {
        entity: ModuleForm,
        dto: ModuleFormDto,
        patch: ModuleFormPatch,
        contract: ModuleFormContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    /// Role assignments are listed for the admin screen, inactive ones included
    RoleUserDefinition {
        entity: RoleUser,
        dto: RoleUserDto,
        patch: RoleUserPatch,
        contract: RoleUserContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    RoleFormPermissionDefinition {
        entity: RoleFormPermission,
        dto: RoleFormPermissionDto,
        patch: RoleFormPermissionPatch,
        contract: RoleFormPermissionContract,
        list_filter: ListFilter::All,
    }
}

pub type RoleService = CrudService<RoleDefinition>;
pub type PermissionService = CrudService<PermissionDefinition>;
pub type FormService = CrudService<FormDefinition>;
pub type ModuleService = CrudService<ModuleDefinition>;

/// Module ↔ form links
#[derive(Clone)]
pub struct ModuleFormService {
    crud: CrudService<ModuleFormDefinition>,
    lookups: Arc<dyn ModuleFormRepository>,
}

impl ModuleFormService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<ModuleForm> + ModuleFormRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            lookups: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Links belonging to one module
    pub async fn forms_for_module(&self, module_id: Id) -> ServiceResult<Vec<ModuleFormDto>> {
        check_id("module_id", module_id).map_err(|e| self.crud.invalid(e))?;
        let links = self
            .lookups
            .get_by_module_id(module_id)
            .await
            .map_err(|e| self.crud.store_failure("forms_for_module", e))?;
        Ok(links.iter().map(ModuleFormDefinition::to_dto).collect())
    }
}

impl Deref for ModuleFormService {
    type Target = CrudService<ModuleFormDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// Role ↔ user assignments
#[derive(Clone)]
pub struct RoleUserService {
    crud: CrudService<RoleUserDefinition>,
    lookups: Arc<dyn RoleUserRepository>,
}

impl RoleUserService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<RoleUser> + RoleUserRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            lookups: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Active role assignments of a user
    pub async fn roles_for_user(&self, user_id: Id) -> ServiceResult<Vec<RoleUserDto>> {
        check_id("user_id", user_id).map_err(|e| self.crud.invalid(e))?;
        let assignments = self
            .lookups
            .get_by_user_id(user_id)
            .await
            .map_err(|e| self.crud.store_failure("roles_for_user", e))?;
        Ok(assignments
            .iter()
            .filter(|a| a.is_active)
            .map(RoleUserDefinition::to_dto)
            .collect())
    }
}

impl Deref for RoleUserService {
    type Target = CrudService<RoleUserDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

/// Role × form × permission grants
#[derive(Clone)]
pub struct RoleFormPermissionService {
    crud: CrudService<RoleFormPermissionDefinition>,
    lookups: Arc<dyn RoleFormPermissionRepository>,
}

impl RoleFormPermissionService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<RoleFormPermission> + RoleFormPermissionRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            lookups: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    async fn grants(&self, role_id: Id, operation: &str) -> ServiceResult<Vec<RoleFormPermission>> {
        check_id("role_id", role_id).map_err(|e| self.crud.invalid(e))?;
        self.lookups
            .get_by_role_id(role_id)
            .await
            .map_err(|e| self.crud.store_failure(operation, e))
    }

    pub async fn grants_for_role(&self, role_id: Id) -> ServiceResult<Vec<RoleFormPermissionDto>> {
        let grants = self.grants(role_id, "grants_for_role").await?;
        Ok(grants.iter().map(RoleFormPermissionDefinition::to_dto).collect())
    }

    /// Whether any grant of `role_id` on `form_id` allows `action`
    pub async fn can(&self, role_id: Id, form_id: Id, action: FormAction) -> ServiceResult<bool> {
        check_id("form_id", form_id).map_err(|e| self.crud.invalid(e))?;
        let allowed = self
            .grants(role_id, "can")
            .await?
            .iter()
            .any(|g| g.form_id == form_id && g.allows(action));
        debug!(role_id, form_id, ?action, allowed, "Permission check");
        Ok(allowed)
    }
}

impl Deref for RoleFormPermissionService {
    type Target = CrudService<RoleFormPermissionDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbac_db::MemoryRepository;

    #[tokio::test]
    async fn test_active_only_catalogues_hide_inactive() {
        let roles = RoleService::new(Arc::new(MemoryRepository::<Role>::new()));
        let permissions = PermissionService::new(Arc::new(MemoryRepository::<Permission>::new()));
        let forms = FormService::new(Arc::new(MemoryRepository::<Form>::new()));

        let role = roles
            .create(RoleDto {
                role_name: "admin".to_string(),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let permission = permissions
            .create(PermissionDto {
                name: "reports.export".to_string(),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let form = forms
            .create(FormDto {
                name: "Users".to_string(),
                status: true,
                ..Default::default()
            })
            .await
            .unwrap();

        roles.set_active_status(role.id, false).await.unwrap();
        permissions.set_active_status(permission.id, false).await.unwrap();
        forms.set_active_status(form.id, false).await.unwrap();

        assert!(roles.list().await.unwrap().is_empty());
        assert!(permissions.list().await.unwrap().is_empty());
        assert!(forms.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_catalogues_keep_inactive() {
        let modules = ModuleService::new(Arc::new(MemoryRepository::<Module>::new()));
        let role_users = RoleUserService::new(Arc::new(MemoryRepository::<RoleUser>::new()));

        let module = modules
            .create(ModuleDto {
                name: "Security".to_string(),
                status: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let assignment = role_users
            .create(RoleUserDto {
                role_id: 1,
                user_id: 2,
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();

        modules.set_active_status(module.id, false).await.unwrap();
        role_users.set_active_status(assignment.id, false).await.unwrap();

        let listed = modules.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].status);
        assert_eq!(role_users.list().await.unwrap().len(), 1);
        assert!(role_users.roles_for_user(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_form_creation_date_defaults_to_today() {
        let forms = FormService::new(Arc::new(MemoryRepository::<Form>::new()));
        let form = forms
            .create(FormDto {
                name: "Bills".to_string(),
                status: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(form.date_creation, Some(chrono::Utc::now().date_naive()));
    }

    #[tokio::test]
    async fn test_forms_for_module() {
        let links = ModuleFormService::new(Arc::new(MemoryRepository::<ModuleForm>::new()));
        for (module_id, form_id) in [(1, 10), (1, 11), (2, 12)] {
            links
                .create(ModuleFormDto {
                    module_id,
                    form_id,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let forms: Vec<Id> = links
            .forms_for_module(1)
            .await
            .unwrap()
            .iter()
            .map(|l| l.form_id)
            .collect();
        assert_eq!(forms, vec![10, 11]);
        assert_eq!(links.forms_for_module(0).await.unwrap_err().field(), Some("module_id"));
    }

    #[tokio::test]
    async fn test_can() {
        let grants = RoleFormPermissionService::new(Arc::new(
            MemoryRepository::<RoleFormPermission>::new(),
        ));
        grants
            .create(RoleFormPermissionDto {
                role_id: 1,
                form_id: 10,
                permission_id: 3,
                can_read: true,
                can_update: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(grants.can(1, 10, FormAction::Read).await.unwrap());
        assert!(!grants.can(1, 10, FormAction::Delete).await.unwrap());
        assert!(!grants.can(1, 11, FormAction::Read).await.unwrap());
        assert!(!grants.can(2, 10, FormAction::Read).await.unwrap());
        assert_eq!(grants.grants_for_role(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_grant_patch_toggles_action() {
        let grants = RoleFormPermissionService::new(Arc::new(
            MemoryRepository::<RoleFormPermission>::new(),
        ));
        let grant = grants
            .create(RoleFormPermissionDto {
                role_id: 1,
                form_id: 10,
                permission_id: 3,
                ..Default::default()
            })
            .await
            .unwrap();

        grants
            .patch(grant.id, RoleFormPermissionPatch::new().with_action(FormAction::Delete, true))
            .await
            .unwrap();
        assert!(grants.can(1, 10, FormAction::Delete).await.unwrap());
    }

    #[tokio::test]
    async fn test_active_only_rejected_without_flag() {
        let links = Arc::new(MemoryRepository::<ModuleForm>::new());
        let result =
            CrudService::<ModuleFormDefinition>::new(links).with_list_filter(ListFilter::ActiveOnly);
        let err = result.err().unwrap();
        assert!(matches!(
            err,
            rbac_core::error::ServiceError::BusinessRuleViolation { .. }
        ));

        assert!(ModuleService::new(Arc::new(MemoryRepository::<Module>::new()))
            .with_list_filter(ListFilter::ActiveOnly)
            .is_ok());
    }
}
