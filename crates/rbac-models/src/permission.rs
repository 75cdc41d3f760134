//! Permission model

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Permission {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Permission);
transfer!(PermissionDto);

impl Entity for Permission {
    const TYPE_NAME: &'static str = "Permission";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for Permission {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Permission {
    pub fn from_dto(dto: &PermissionDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &PermissionDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &PermissionPatch) {
        if let Some(ref name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Permission> for PermissionDto {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name.clone(),
            description: permission.description.clone(),
            is_active: permission.is_active,
            row_version: permission.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PermissionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl PermissionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
