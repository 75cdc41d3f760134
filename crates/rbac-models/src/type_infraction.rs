//! Infraction type model
//!
//! Catalogue entry describing a kind of violation and how many daily
//! minimum wages (SMLDV) it is fined at.

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeInfraction {
    pub id: Id,
    pub type_violation: String,
    pub description: String,
    pub smldv_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(TypeInfraction);
transfer!(TypeInfractionDto);

impl Entity for TypeInfraction {
    const TYPE_NAME: &'static str = "TypeInfraction";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for TypeInfraction {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl TypeInfraction {
    pub fn from_dto(dto: &TypeInfractionDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            type_violation: dto.type_violation.trim().to_string(),
            description: dto.description.trim().to_string(),
            smldv_count: dto.smldv_count,
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &TypeInfractionDto) {
        self.type_violation = dto.type_violation.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.smldv_count = dto.smldv_count;
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &TypeInfractionPatch) {
        if let Some(ref type_violation) = patch.type_violation {
            self.type_violation = type_violation.trim().to_string();
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(smldv_count) = patch.smldv_count {
            self.smldv_count = smldv_count;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfractionDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 150))]
    pub type_violation: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    pub smldv_count: i32,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&TypeInfraction> for TypeInfractionDto {
    fn from(kind: &TypeInfraction) -> Self {
        Self {
            id: kind.id,
            type_violation: kind.type_violation.clone(),
            description: kind.description.clone(),
            smldv_count: kind.smldv_count,
            is_active: kind.is_active,
            row_version: kind.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeInfractionPatch {
    pub type_violation: Option<String>,
    pub description: Option<String>,
    pub smldv_count: Option<i32>,
    pub is_active: Option<bool>,
}

impl TypeInfractionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_violation(mut self, type_violation: impl Into<String>) -> Self {
        self.type_violation = Some(type_violation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_smldv_count(mut self, smldv_count: i32) -> Self {
        self.smldv_count = Some(smldv_count);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
