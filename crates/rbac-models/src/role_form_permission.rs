//! Role × form × permission grant
//!
//! Each row grants one role a permission on one form, with CRUD action flags.

use chrono::{DateTime, Utc};
use rbac_core::traits::{Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Action checked against a grant's flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    Create,
    Read,
    Update,
    Delete,
}

impl std::str::FromStr for FormAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(FormAction::Create),
            "read" => Ok(FormAction::Read),
            "update" => Ok(FormAction::Update),
            "delete" => Ok(FormAction::Delete),
            other => Err(format!("unknown form action '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleFormPermission {
    pub id: Id,
    pub role_id: Id,
    pub form_id: Id,
    pub permission_id: Id,
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(RoleFormPermission);
transfer!(RoleFormPermissionDto);

impl Entity for RoleFormPermission {
    const TYPE_NAME: &'static str = "RoleFormPermission";
}

impl RoleFormPermission {
    pub fn allows(&self, action: FormAction) -> bool {
        match action {
            FormAction::Create => self.can_create,
            FormAction::Read => self.can_read,
            FormAction::Update => self.can_update,
            FormAction::Delete => self.can_delete,
        }
    }

    pub fn from_dto(dto: &RoleFormPermissionDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            role_id: dto.role_id,
            form_id: dto.form_id,
            permission_id: dto.permission_id,
            can_create: dto.can_create,
            can_read: dto.can_read,
            can_update: dto.can_update,
            can_delete: dto.can_delete,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &RoleFormPermissionDto) {
        self.role_id = dto.role_id;
        self.form_id = dto.form_id;
        self.permission_id = dto.permission_id;
        self.can_create = dto.can_create;
        self.can_read = dto.can_read;
        self.can_update = dto.can_update;
        self.can_delete = dto.can_delete;
    }

    pub fn apply_patch(&mut self, patch: &RoleFormPermissionPatch) {
        if let Some(role_id) = patch.role_id {
            self.role_id = role_id;
        }
        if let Some(form_id) = patch.form_id {
            self.form_id = form_id;
        }
        if let Some(permission_id) = patch.permission_id {
            self.permission_id = permission_id;
        }
        if let Some(can_create) = patch.can_create {
            self.can_create = can_create;
        }
        if let Some(can_read) = patch.can_read {
            self.can_read = can_read;
        }
        if let Some(can_update) = patch.can_update {
            self.can_update = can_update;
        }
        if let Some(can_delete) = patch.can_delete {
            self.can_delete = can_delete;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleFormPermissionDto {
    #[serde(default)]
    pub id: Id,
    pub role_id: Id,
    pub form_id: Id,
    pub permission_id: Id,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&RoleFormPermission> for RoleFormPermissionDto {
    fn from(grant: &RoleFormPermission) -> Self {
        Self {
            id: grant.id,
            role_id: grant.role_id,
            form_id: grant.form_id,
            permission_id: grant.permission_id,
            can_create: grant.can_create,
            can_read: grant.can_read,
            can_update: grant.can_update,
            can_delete: grant.can_delete,
            row_version: grant.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleFormPermissionPatch {
    pub role_id: Option<Id>,
    pub form_id: Option<Id>,
    pub permission_id: Option<Id>,
    pub can_create: Option<bool>,
    pub can_read: Option<bool>,
    pub can_update: Option<bool>,
    pub can_delete: Option<bool>,
}

impl RoleFormPermissionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role_id(mut self, role_id: Id) -> Self {
        self.role_id = Some(role_id);
        self
    }

    pub fn with_form_id(mut self, form_id: Id) -> Self {
        self.form_id = Some(form_id);
        self
    }

    pub fn with_permission_id(mut self, permission_id: Id) -> Self {
        self.permission_id = Some(permission_id);
        self
    }

    /// Set the flag for one action
    pub fn with_action(mut self, action: FormAction, allowed: bool) -> Self {
        match action {
            FormAction::Create => self.can_create = Some(allowed),
            FormAction::Read => self.can_read = Some(allowed),
            FormAction::Update => self.can_update = Some(allowed),
            FormAction::Delete => self.can_delete = Some(allowed),
        }
        self
    }
}
