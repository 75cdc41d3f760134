//! Access log model

use chrono::{DateTime, Utc};
use rbac_core::traits::{Entity, Id};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One recorded action performed by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessLog {
    pub id: Id,
    pub user_id: Id,
    pub action: String,
    /// Whether the action succeeded
    pub status: bool,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(AccessLog);
transfer!(AccessLogDto);

impl Entity for AccessLog {
    const TYPE_NAME: &'static str = "AccessLog";
}

impl AccessLog {
    pub fn from_dto(dto: &AccessLogDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id: dto.user_id,
            action: dto.action.trim().to_string(),
            status: dto.status,
            details: normalize_details(dto.details.as_deref()),
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &AccessLogDto) {
        self.user_id = dto.user_id;
        self.action = dto.action.trim().to_string();
        self.status = dto.status;
        self.details = normalize_details(dto.details.as_deref());
    }

    pub fn apply_patch(&mut self, patch: &AccessLogPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(ref action) = patch.action {
            self.action = action.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(ref details) = patch.details {
            self.details = normalize_details(details.as_deref());
        }
    }
}

fn normalize_details(details: Option<&str>) -> Option<String> {
    details
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogDto {
    #[serde(default)]
    pub id: Id,

    pub user_id: Id,

    #[validate(length(max = 100))]
    pub action: String,

    #[serde(default)]
    pub status: bool,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&AccessLog> for AccessLogDto {
    fn from(log: &AccessLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            action: log.action.clone(),
            status: log.status,
            details: log.details.clone(),
            created_at: Some(log.created_at),
            row_version: log.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessLogPatch {
    pub user_id: Option<Id>,
    pub action: Option<String>,
    pub status: Option<bool>,
    /// `Some(None)` clears the details
    pub details: Option<Option<String>>,
}

impl AccessLogPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_details_are_dropped() {
        let dto = AccessLogDto {
            user_id: 1,
            action: "login".into(),
            status: true,
            details: Some("   ".into()),
            ..Default::default()
        };
        let log = AccessLog::from_dto(&dto, Utc::now());
        assert_eq!(log.details, None);
    }

    #[test]
    fn test_patch_clears_details() {
        let dto = AccessLogDto {
            user_id: 1,
            action: "login".into(),
            details: Some("from 10.0.0.1".into()),
            ..Default::default()
        };
        let mut log = AccessLog::from_dto(&dto, Utc::now());
        log.apply_patch(&AccessLogPatch::new().with_details(None));
        assert_eq!(log.details, None);
    }
}
