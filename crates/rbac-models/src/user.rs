//! User model
//!
//! An account that signs in to the admin backend. Every user belongs to a
//! [`Person`](crate::Person) record.

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    /// Stored credential; never copied into a DTO
    pub password: String,
    pub person_id: Id,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(User);
transfer!(UserDto);

impl Entity for User {
    const TYPE_NAME: &'static str = "User";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for User {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// User transfer object
///
/// `password` is accepted on input and always `None` on output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 100))]
    pub username: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub password: Option<String>,

    pub person_id: Id,

    #[serde(default)]
    pub is_active: bool,

    /// Version the caller last read; `0` skips the staleness check
    #[serde(default)]
    pub row_version: i64,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            password: None,
            person_id: user.person_id,
            is_active: user.is_active,
            row_version: user.row_version,
        }
    }
}

impl User {
    /// Build a new, unsaved user from a validated DTO
    pub fn from_dto(dto: &UserDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            username: dto.username.trim().to_string(),
            email: dto.email.trim().to_string(),
            password: dto.password.clone().unwrap_or_default(),
            person_id: dto.person_id,
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    /// Copy the writable fields of a DTO onto this user.
    /// The password is only replaced when the DTO carries a non-blank one.
    pub fn apply_dto(&mut self, dto: &UserDto) {
        self.username = dto.username.trim().to_string();
        self.email = dto.email.trim().to_string();
        self.person_id = dto.person_id;
        self.is_active = dto.is_active;
        if let Some(password) = dto.password.as_deref().filter(|p| !p.trim().is_empty()) {
            self.password = password.to_string();
        }
    }

    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(ref username) = patch.username {
            self.username = username.trim().to_string();
        }
        if let Some(ref email) = patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(ref password) = patch.password {
            self.password = password.clone();
        }
        if let Some(person_id) = patch.person_id {
            self.person_id = person_id;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

/// Partial update for a user
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub person_id: Option<Id>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_person_id(mut self, person_id: Id) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.person_id.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: 3,
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
            password: "secret".to_string(),
            person_id: 1,
            is_active: true,
            created_at: Utc::now(),
            row_version: 2,
        }
    }

    #[test]
    fn test_dto_never_carries_password() {
        let dto = UserDto::from(&sample());
        assert_eq!(dto.password, None);
        assert_eq!(dto.username, "bob");
        assert_eq!(dto.row_version, 2);

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["personId"], 1);
    }

    #[test]
    fn test_mapping_round_trip() {
        let user = sample();
        let dto = UserDto::from(&user);
        let rebuilt = User {
            id: dto.id,
            username: dto.username.clone(),
            email: dto.email.clone(),
            password: user.password.clone(),
            person_id: dto.person_id,
            is_active: dto.is_active,
            created_at: user.created_at,
            row_version: dto.row_version,
        };
        assert_eq!(UserDto::from(&rebuilt), dto);
    }

    #[test]
    fn test_apply_dto_keeps_password_when_absent() {
        let mut user = sample();
        let dto = UserDto {
            username: "robert".to_string(),
            email: "r@x.com".to_string(),
            person_id: 1,
            is_active: false,
            ..Default::default()
        };
        user.apply_dto(&dto);
        assert_eq!(user.username, "robert");
        assert_eq!(user.password, "secret");
        assert!(!user.is_active);
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut user = sample();
        user.apply_patch(&UserPatch::new().with_email("new@x.com"));
        assert_eq!(user.email, "new@x.com");
        assert_eq!(user.username, "bob");
        assert!(UserPatch::new().is_empty());
    }
}
