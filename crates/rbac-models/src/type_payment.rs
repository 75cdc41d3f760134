//! Payment type model (cash, card, transfer, ...)

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypePayment {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(TypePayment);
transfer!(TypePaymentDto);

impl Entity for TypePayment {
    const TYPE_NAME: &'static str = "TypePayment";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for TypePayment {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl TypePayment {
    pub fn from_dto(dto: &TypePaymentDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &TypePaymentDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &TypePaymentPatch) {
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
pub struct TypePaymentDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&TypePayment> for TypePaymentDto {
    fn from(type_payment: &TypePayment) -> Self {
        Self {
            id: type_payment.id,
            name: type_payment.name.clone(),
            description: type_payment.description.clone(),
            is_active: type_payment.is_active,
            row_version: type_payment.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypePaymentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl TypePaymentPatch {
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
