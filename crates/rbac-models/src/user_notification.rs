//! In-app notification addressed to a single user

use chrono::{DateTime, Utc};
use rbac_core::traits::{Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserNotification {
    pub id: Id,
    pub user_id: Id,
    pub message: String,
    pub is_read: bool,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(UserNotification);
transfer!(UserNotificationDto);

impl Entity for UserNotification {
    const TYPE_NAME: &'static str = "UserNotification";
}

impl UserNotification {
    pub fn from_dto(dto: &UserNotificationDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id: dto.user_id,
            message: dto.message.trim().to_string(),
            is_read: dto.is_read,
            is_hidden: dto.is_hidden,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &UserNotificationDto) {
        self.user_id = dto.user_id;
        self.message = dto.message.trim().to_string();
        self.is_read = dto.is_read;
        self.is_hidden = dto.is_hidden;
    }

    pub fn apply_patch(&mut self, patch: &UserNotificationPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(ref message) = patch.message {
            self.message = message.trim().to_string();
        }
        if let Some(is_read) = patch.is_read {
            self.is_read = is_read;
        }
        if let Some(is_hidden) = patch.is_hidden {
            self.is_hidden = is_hidden;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserNotificationDto {
    #[serde(default)]
    pub id: Id,

    pub user_id: Id,

    #[validate(length(max = 1000))]
    pub message: String,

    #[serde(default)]
    pub is_read: bool,

    #[serde(default)]
    pub is_hidden: bool,

    /// Set by the store, ignored on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&UserNotification> for UserNotificationDto {
    fn from(notification: &UserNotification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            message: notification.message.clone(),
            is_read: notification.is_read,
            is_hidden: notification.is_hidden,
            created_at: Some(notification.created_at),
            row_version: notification.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserNotificationPatch {
    pub user_id: Option<Id>,
    pub message: Option<String>,
    pub is_read: Option<bool>,
    pub is_hidden: Option<bool>,
}

impl UserNotificationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = Some(is_read);
        self
    }

    pub fn with_hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = Some(is_hidden);
        self
    }
}
