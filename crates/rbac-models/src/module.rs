//! Module model
//!
//! A navigation module grouping forms. Like forms, `status` is the active flag.

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Module);
transfer!(ModuleDto);

impl Entity for Module {
    const TYPE_NAME: &'static str = "Module";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.status)
    }
}

impl ActiveFlag for Module {
    fn is_active(&self) -> bool {
        self.status
    }

    fn set_active(&mut self, active: bool) {
        self.status = active;
    }
}

impl Module {
    pub fn from_dto(dto: &ModuleDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            status: dto.status,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &ModuleDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.status = dto.status;
    }

    pub fn apply_patch(&mut self, patch: &ModulePatch) {
        if let Some(ref name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub status: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Module> for ModuleDto {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id,
            name: module.name.clone(),
            description: module.description.clone(),
            status: module.status,
            row_version: module.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl ModulePatch {
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

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}
