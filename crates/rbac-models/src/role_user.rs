//! Role ↔ user assignment

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleUser {
    pub id: Id,
    pub role_id: Id,
    pub user_id: Id,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(RoleUser);
transfer!(RoleUserDto);

impl Entity for RoleUser {
    const TYPE_NAME: &'static str = "RoleUser";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for RoleUser {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl RoleUser {
    pub fn from_dto(dto: &RoleUserDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            role_id: dto.role_id,
            user_id: dto.user_id,
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &RoleUserDto) {
        self.role_id = dto.role_id;
        self.user_id = dto.user_id;
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &RoleUserPatch) {
        if let Some(role_id) = patch.role_id {
            self.role_id = role_id;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleUserDto {
    #[serde(default)]
    pub id: Id,
    pub role_id: Id,
    pub user_id: Id,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&RoleUser> for RoleUserDto {
    fn from(assignment: &RoleUser) -> Self {
        Self {
            id: assignment.id,
            role_id: assignment.role_id,
            user_id: assignment.user_id,
            is_active: assignment.is_active,
            row_version: assignment.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleUserPatch {
    pub role_id: Option<Id>,
    pub user_id: Option<Id>,
    pub is_active: Option<bool>,
}

impl RoleUserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role_id(mut self, role_id: Id) -> Self {
        self.role_id = Some(role_id);
        self
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
