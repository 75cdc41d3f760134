//! Infraction state model
//!
//! A traffic infraction recorded against a person. `state` is `true` while the
//! fine is still pending.

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateInfraction {
    pub id: Id,
    pub type_infraction_id: Id,
    pub person_id: Id,
    pub document_number: String,
    pub fine_value: Decimal,
    pub state: bool,
    pub date_violation: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(StateInfraction);
transfer!(StateInfractionDto);

impl Entity for StateInfraction {
    const TYPE_NAME: &'static str = "StateInfraction";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for StateInfraction {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl StateInfraction {
    /// Expects a validated DTO (`date_violation` present).
    pub fn from_dto(dto: &StateInfractionDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            type_infraction_id: dto.type_infraction_id,
            person_id: dto.person_id,
            document_number: dto.document_number.trim().to_string(),
            fine_value: dto.fine_value,
            state: dto.state,
            date_violation: dto.date_violation.unwrap_or_else(|| now.date_naive()),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &StateInfractionDto) {
        self.type_infraction_id = dto.type_infraction_id;
        self.person_id = dto.person_id;
        self.document_number = dto.document_number.trim().to_string();
        self.fine_value = dto.fine_value;
        self.state = dto.state;
        if let Some(date_violation) = dto.date_violation {
            self.date_violation = date_violation;
        }
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &StateInfractionPatch) {
        if let Some(type_infraction_id) = patch.type_infraction_id {
            self.type_infraction_id = type_infraction_id;
        }
        if let Some(person_id) = patch.person_id {
            self.person_id = person_id;
        }
        if let Some(ref document_number) = patch.document_number {
            self.document_number = document_number.trim().to_string();
        }
        if let Some(fine_value) = patch.fine_value {
            self.fine_value = fine_value;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(date_violation) = patch.date_violation {
            self.date_violation = date_violation;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateInfractionDto {
    #[serde(default)]
    pub id: Id,

    pub type_infraction_id: Id,

    pub person_id: Id,

    #[validate(length(max = 20))]
    pub document_number: String,

    pub fine_value: Decimal,

    #[serde(default)]
    pub state: bool,

    #[serde(default)]
    pub date_violation: Option<NaiveDate>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&StateInfraction> for StateInfractionDto {
    fn from(infraction: &StateInfraction) -> Self {
        Self {
            id: infraction.id,
            type_infraction_id: infraction.type_infraction_id,
            person_id: infraction.person_id,
            document_number: infraction.document_number.clone(),
            fine_value: infraction.fine_value,
            state: infraction.state,
            date_violation: Some(infraction.date_violation),
            is_active: infraction.is_active,
            row_version: infraction.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StateInfractionPatch {
    pub type_infraction_id: Option<Id>,
    pub person_id: Option<Id>,
    pub document_number: Option<String>,
    pub fine_value: Option<Decimal>,
    pub state: Option<bool>,
    pub date_violation: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl StateInfractionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_infraction_id(mut self, type_infraction_id: Id) -> Self {
        self.type_infraction_id = Some(type_infraction_id);
        self
    }

    pub fn with_person_id(mut self, person_id: Id) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn with_document_number(mut self, document_number: impl Into<String>) -> Self {
        self.document_number = Some(document_number.into());
        self
    }

    pub fn with_fine_value(mut self, fine_value: Decimal) -> Self {
        self.fine_value = Some(fine_value);
        self
    }

    pub fn with_state(mut self, state: bool) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_date_violation(mut self, date_violation: NaiveDate) -> Self {
        self.date_violation = Some(date_violation);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
