//! Contracts for user notifications and access logs

use rbac_core::error::ValidationErrors;
use rbac_models::{AccessLogDto, AccessLogPatch, UserNotificationDto, UserNotificationPatch};

use crate::base::*;

pub struct UserNotificationContract;

impl Contract<UserNotificationDto> for UserNotificationContract {
    fn validate(&self, dto: &UserNotificationDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("user_id", dto.user_id, &mut errors);
        require_text("message", &dto.message, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<UserNotificationPatch> for UserNotificationContract {
    fn validate(&self, patch: &UserNotificationPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("user_id", patch.user_id, &mut errors);
        optional_text("message", patch.message.as_deref(), &mut errors);
        max_length("message", patch.message.as_deref(), 1000, &mut errors);
        errors.into_result()
    }
}

pub struct AccessLogContract;

impl Contract<AccessLogDto> for AccessLogContract {
    fn validate(&self, dto: &AccessLogDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("user_id", dto.user_id, &mut errors);
        require_text("action", &dto.action, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<AccessLogPatch> for AccessLogContract {
    fn validate(&self, patch: &AccessLogPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("user_id", patch.user_id, &mut errors);
        optional_text("action", patch.action.as_deref(), &mut errors);
        max_length("action", patch.action.as_deref(), 100, &mut errors);
        if let Some(details) = &patch.details {
            max_length("details", details.as_deref(), 2000, &mut errors);
        }
        errors.into_result()
    }
}
