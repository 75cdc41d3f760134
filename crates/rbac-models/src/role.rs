//! Role model
//!
//! Roles group form permissions and are assigned to users through
//! [`RoleUser`](crate::RoleUser).

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: Id,
    pub role_name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Role);
transfer!(RoleDto);

impl Entity for Role {
    const TYPE_NAME: &'static str = "Role";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for Role {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Role {
    pub fn from_dto(dto: &RoleDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            role_name: dto.role_name.trim().to_string(),
            description: dto.description.trim().to_string(),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &RoleDto) {
        self.role_name = dto.role_name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &RolePatch) {
        if let Some(ref role_name) = patch.role_name {
            self.role_name = role_name.trim().to_string();
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
pub struct RoleDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub role_name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            role_name: role.role_name.clone(),
            description: role.description.clone(),
            is_active: role.is_active,
            row_version: role.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RolePatch {
    pub role_name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl RolePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dto_trims_and_resets_identity() {
        let dto = RoleDto {
            id: 99,
            role_name: "  Auditor ".to_string(),
            description: "Read-only access".to_string(),
            is_active: true,
            row_version: 5,
        };
        let role = Role::from_dto(&dto, Utc::now());
        assert_eq!(role.id, 0);
        assert_eq!(role.row_version, 0);
        assert_eq!(role.role_name, "Auditor");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{ "roleName": "Admin", "isActive": true }"#;
        let dto: RoleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.role_name, "Admin");
        assert!(dto.is_active);
        assert_eq!(dto.id, 0);
    }
}
