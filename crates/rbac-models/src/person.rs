//! Person model
//!
//! Natural person behind users, payments and infractions. Looked up by
//! document number when resolving infractions.

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub document_number: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Person);
transfer!(PersonDto);

impl Entity for Person {
    const TYPE_NAME: &'static str = "Person";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for Person {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn from_dto(dto: &PersonDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone: dto.phone.trim().to_string(),
            document_number: dto.document_number.trim().to_string(),
            email: dto.email.clone(),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &PersonDto) {
        self.first_name = dto.first_name.trim().to_string();
        self.last_name = dto.last_name.trim().to_string();
        self.phone = dto.phone.trim().to_string();
        self.document_number = dto.document_number.trim().to_string();
        self.email = dto.email.clone();
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &PersonPatch) {
        if let Some(ref first_name) = patch.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(ref last_name) = patch.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(ref phone) = patch.phone {
            self.phone = phone.trim().to_string();
        }
        if let Some(ref document_number) = patch.document_number {
            self.document_number = document_number.trim().to_string();
        }
        if let Some(ref email) = patch.email {
            self.email = email.clone();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub first_name: String,

    #[validate(length(max = 100))]
    pub last_name: String,

    #[validate(length(max = 20))]
    pub phone: String,

    #[validate(length(max = 20))]
    pub document_number: String,

    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Person> for PersonDto {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            phone: person.phone.clone(),
            document_number: person.document_number.clone(),
            email: person.email.clone(),
            is_active: person.is_active,
            row_version: person.row_version,
        }
    }
}

/// Partial update for a person. `email: Some(None)` clears the address.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub document_number: Option<String>,
    pub email: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl PersonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_document_number(mut self, document_number: impl Into<String>) -> Self {
        self.document_number = Some(document_number.into());
        self
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
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
    fn test_full_name() {
        let dto = PersonDto {
            first_name: " Ana ".to_string(),
            last_name: "Ruiz".to_string(),
            phone: "3001234567".to_string(),
            document_number: "1020304050".to_string(),
            is_active: true,
            ..Default::default()
        };
        let person = Person::from_dto(&dto, Utc::now());
        assert_eq!(person.full_name(), "Ana Ruiz");
        assert_eq!(person.id, 0);
    }

    #[test]
    fn test_patch_clears_email() {
        let dto = PersonDto {
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            phone: "3001234567".to_string(),
            document_number: "1020304050".to_string(),
            email: Some("ana@example.com".to_string()),
            is_active: true,
            ..Default::default()
        };
        let mut person = Person::from_dto(&dto, Utc::now());
        person.apply_patch(&PersonPatch::new().with_email(None));
        assert_eq!(person.email, None);
        assert_eq!(person.first_name, "Ana");
    }
}
