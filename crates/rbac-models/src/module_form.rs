//! Module ↔ form junction

use chrono::{DateTime, Utc};
use rbac_core::traits::{Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleForm {
    pub id: Id,
    pub module_id: Id,
    pub form_id: Id,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(ModuleForm);
transfer!(ModuleFormDto);

impl Entity for ModuleForm {
    const TYPE_NAME: &'static str = "ModuleForm";
}

impl ModuleForm {
    pub fn from_dto(dto: &ModuleFormDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            module_id: dto.module_id,
            form_id: dto.form_id,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &ModuleFormDto) {
        self.module_id = dto.module_id;
        self.form_id = dto.form_id;
    }

    pub fn apply_patch(&mut self, patch: &ModuleFormPatch) {
        if let Some(module_id) = patch.module_id {
            self.module_id = module_id;
        }
        if let Some(form_id) = patch.form_id {
            self.form_id = form_id;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFormDto {
    #[serde(default)]
    pub id: Id,
    pub module_id: Id,
    pub form_id: Id,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&ModuleForm> for ModuleFormDto {
    fn from(link: &ModuleForm) -> Self {
        Self {
            id: link.id,
            module_id: link.module_id,
            form_id: link.form_id,
            row_version: link.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleFormPatch {
    pub module_id: Option<Id>,
    pub form_id: Option<Id>,
}

impl ModuleFormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_id(mut self, module_id: Id) -> Self {
        self.module_id = Some(module_id);
        self
    }

    pub fn with_form_id(mut self, form_id: Id) -> Self {
        self.form_id = Some(form_id);
        self
    }
}
