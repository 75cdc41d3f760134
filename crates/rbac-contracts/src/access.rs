//! Contracts for the access-control catalogue
//!
//! Roles, permissions, forms, modules and the junctions between them.
//! Descriptions are free text and may be empty; names may not.

use rbac_core::error::ValidationErrors;
use rbac_models::{
    FormDto, FormPatch, ModuleDto, ModuleFormDto, ModuleFormPatch, ModulePatch, PermissionDto,
    PermissionPatch, RoleDto, RoleFormPermissionDto, RoleFormPermissionPatch, RolePatch,
    RoleUserDto, RoleUserPatch,
};

use crate::base::*;

pub struct RoleContract;

impl Contract<RoleDto> for RoleContract {
    fn validate(&self, dto: &RoleDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("role_name", &dto.role_name, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<RolePatch> for RoleContract {
    fn validate(&self, patch: &RolePatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("role_name", patch.role_name.as_deref(), &mut errors);
        max_length("role_name", patch.role_name.as_deref(), 100, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        errors.into_result()
    }
}

pub struct PermissionContract;

impl Contract<PermissionDto> for PermissionContract {
    fn validate(&self, dto: &PermissionDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("name", &dto.name, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<PermissionPatch> for PermissionContract {
    fn validate(&self, patch: &PermissionPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("name", patch.name.as_deref(), &mut errors);
        max_length("name", patch.name.as_deref(), 100, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        errors.into_result()
    }
}

pub struct FormContract;

impl Contract<FormDto> for FormContract {
    fn validate(&self, dto: &FormDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("name", &dto.name, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<FormPatch> for FormContract {
    fn validate(&self, patch: &FormPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("name", patch.name.as_deref(), &mut errors);
        max_length("name", patch.name.as_deref(), 100, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        errors.into_result()
    }
}

pub struct ModuleContract;

impl Contract<ModuleDto> for ModuleContract {
    fn validate(&self, dto: &ModuleDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("name", &dto.name, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<ModulePatch> for ModuleContract {
    fn validate(&self, patch: &ModulePatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("name", patch.name.as_deref(), &mut errors);
        max_length("name", patch.name.as_deref(), 100, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        errors.into_result()
    }
}

pub struct ModuleFormContract;

impl Contract<ModuleFormDto> for ModuleFormContract {
    fn validate(&self, dto: &ModuleFormDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("module_id", dto.module_id, &mut errors);
        require_id("form_id", dto.form_id, &mut errors);
        errors.into_result()
    }
}

impl Contract<ModuleFormPatch> for ModuleFormContract {
    fn validate(&self, patch: &ModuleFormPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("module_id", patch.module_id, &mut errors);
        optional_id("form_id", patch.form_id, &mut errors);
        errors.into_result()
    }
}

pub struct RoleUserContract;

impl Contract<RoleUserDto> for RoleUserContract {
    fn validate(&self, dto: &RoleUserDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("role_id", dto.role_id, &mut errors);
        require_id("user_id", dto.user_id, &mut errors);
        errors.into_result()
    }
}

impl Contract<RoleUserPatch> for RoleUserContract {
    fn validate(&self, patch: &RoleUserPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("role_id", patch.role_id, &mut errors);
        optional_id("user_id", patch.user_id, &mut errors);
        errors.into_result()
    }
}

pub struct RoleFormPermissionContract;

impl Contract<RoleFormPermissionDto> for RoleFormPermissionContract {
    fn validate(&self, dto: &RoleFormPermissionDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("role_id", dto.role_id, &mut errors);
        require_id("form_id", dto.form_id, &mut errors);
        require_id("permission_id", dto.permission_id, &mut errors);
        errors.into_result()
    }
}

impl Contract<RoleFormPermissionPatch> for RoleFormPermissionContract {
    fn validate(&self, patch: &RoleFormPermissionPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("role_id", patch.role_id, &mut errors);
        optional_id("form_id", patch.form_id, &mut errors);
        optional_id("permission_id", patch.permission_id, &mut errors);
        errors.into_result()
    }
}
