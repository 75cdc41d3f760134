//! Contracts for users and persons

use rbac_core::error::ValidationErrors;
use rbac_models::{PersonDto, PersonPatch, UserDto, UserPatch};

use crate::base::*;

/// Contract for user writes.
///
/// A password is required when creating a user. Updates keep the stored
/// password unless a new, non-blank one is supplied.
pub struct UserContract {
    mode: WriteMode,
}

impl UserContract {
    pub fn new(mode: WriteMode) -> Self {
        Self { mode }
    }
}

impl Contract<UserDto> for UserContract {
    fn validate(&self, dto: &UserDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_text("username", &dto.username, &mut errors);
        require_text("email", &dto.email, &mut errors);
        if self.mode == WriteMode::Create {
            require_text("password", dto.password.as_deref().unwrap_or(""), &mut errors);
        }
        require_id("person_id", dto.person_id, &mut errors);
        derived_rules(dto, &mut errors);

        errors.into_result()
    }
}

impl Contract<UserPatch> for UserContract {
    fn validate(&self, patch: &UserPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        optional_text("username", patch.username.as_deref(), &mut errors);
        max_length("username", patch.username.as_deref(), 100, &mut errors);
        optional_text("email", patch.email.as_deref(), &mut errors);
        max_length("email", patch.email.as_deref(), 255, &mut errors);
        if let Some(email) = patch.email.as_deref() {
            if !email.trim().is_empty() && !validator::validate_email(email.trim()) {
                errors.add("email", "is not a valid email address");
            }
        }
        optional_text("password", patch.password.as_deref(), &mut errors);
        optional_id("person_id", patch.person_id, &mut errors);

        errors.into_result()
    }
}

/// Contract for person writes
pub struct PersonContract;

impl Contract<PersonDto> for PersonContract {
    fn validate(&self, dto: &PersonDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_text("first_name", &dto.first_name, &mut errors);
        require_text("last_name", &dto.last_name, &mut errors);
        require_text("phone", &dto.phone, &mut errors);
        require_format("phone", &dto.phone, &PHONE_PATTERN, &mut errors);
        require_text("document_number", &dto.document_number, &mut errors);
        require_format("document_number", &dto.document_number, &DOCUMENT_PATTERN, &mut errors);
        derived_rules(dto, &mut errors);

        errors.into_result()
    }
}

impl Contract<PersonPatch> for PersonContract {
    fn validate(&self, patch: &PersonPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        optional_text("first_name", patch.first_name.as_deref(), &mut errors);
        max_length("first_name", patch.first_name.as_deref(), 100, &mut errors);
        optional_text("last_name", patch.last_name.as_deref(), &mut errors);
        max_length("last_name", patch.last_name.as_deref(), 100, &mut errors);
        if let Some(phone) = patch.phone.as_deref() {
            require_text("phone", phone, &mut errors);
            require_format("phone", phone, &PHONE_PATTERN, &mut errors);
        }
        if let Some(document_number) = patch.document_number.as_deref() {
            require_text("document_number", document_number, &mut errors);
            require_format("document_number", document_number, &DOCUMENT_PATTERN, &mut errors);
        }
        if let Some(Some(email)) = patch.email.as_ref() {
            if !validator::validate_email(email.as_str()) {
                errors.add("email", "is not a valid email address");
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user() -> UserDto {
        UserDto {
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
            password: Some("pw".to_string()),
            person_id: 1,
            is_active: true,
            ..Default::default()
        }
    }

    fn valid_person() -> PersonDto {
        PersonDto {
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            phone: "3001234567".to_string(),
            document_number: "1020304050".to_string(),
            email: Some("ana@example.com".to_string()),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(UserContract::new(WriteMode::Create).validate(&valid_user()).is_ok());
    }

    #[test]
    fn test_create_requires_password() {
        let dto = UserDto {
            password: None,
            ..valid_user()
        };
        let errors = UserContract::new(WriteMode::Create).validate(&dto).unwrap_err();
        assert_eq!(errors.first(), Some(("password", "can't be blank")));

        assert!(UserContract::new(WriteMode::Update).validate(&dto).is_ok());
    }

    #[test]
    fn test_user_blank_username_reported_first() {
        let dto = UserDto {
            username: " ".to_string(),
            person_id: 0,
            ..valid_user()
        };
        let errors = UserContract::new(WriteMode::Create).validate(&dto).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("username"));
        assert!(errors.has_error("person_id"));
    }

    #[test]
    fn test_user_invalid_email() {
        let dto = UserDto {
            email: "not-an-email".to_string(),
            ..valid_user()
        };
        let errors = UserContract::new(WriteMode::Create).validate(&dto).unwrap_err();
        assert_eq!(errors.first(), Some(("email", "is not a valid email address")));
    }

    #[test]
    fn test_user_patch() {
        let contract = UserContract::new(WriteMode::Update);
        assert!(contract.validate(&UserPatch::new().with_active(false)).is_ok());

        let errors = contract
            .validate(&UserPatch::new().with_username(""))
            .unwrap_err();
        assert!(errors.has_error("username"));
    }

    #[test]
    fn test_person_formats() {
        assert!(PersonContract.validate(&valid_person()).is_ok());

        let dto = PersonDto {
            phone: "call me".to_string(),
            ..valid_person()
        };
        let errors = PersonContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first(), Some(("phone", "is invalid")));
    }

    #[test]
    fn test_person_patch_email() {
        let patch = PersonPatch::new().with_email(Some("broken".to_string()));
        assert!(PersonContract.validate(&patch).is_err());

        let patch = PersonPatch::new().with_email(None);
        assert!(PersonContract.validate(&patch).is_ok());
    }
}
