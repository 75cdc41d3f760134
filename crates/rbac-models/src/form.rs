//! Form model
//!
//! A UI screen that permissions are granted on. The `status` field is the
//! form's active flag.

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Form {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub date_creation: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Form);
transfer!(FormDto);

impl Entity for Form {
    const TYPE_NAME: &'static str = "Form";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.status)
    }
}

impl ActiveFlag for Form {
    fn is_active(&self) -> bool {
        self.status
    }

    fn set_active(&mut self, active: bool) {
        self.status = active;
    }
}

impl Form {
    /// `date_creation` defaults to the creation day when the DTO leaves it out
    pub fn from_dto(dto: &FormDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            status: dto.status,
            date_creation: dto.date_creation.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &FormDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.status = dto.status;
        if let Some(date_creation) = dto.date_creation {
            self.date_creation = date_creation;
        }
    }

    pub fn apply_patch(&mut self, patch: &FormPatch) {
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
pub struct FormDto {
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
    pub date_creation: Option<NaiveDate>,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Form> for FormDto {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id,
            name: form.name.clone(),
            description: form.description.clone(),
            status: form.status,
            date_creation: Some(form.date_creation),
            row_version: form.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl FormPatch {
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
