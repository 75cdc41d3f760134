//! Per-user activity feeds: notifications and access logs

use std::ops::Deref;
use std::sync::Arc;

use rbac_contracts::{check_id, AccessLogContract, UserNotificationContract};
use rbac_core::config::AppConfig;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_core::traits::Id;
use rbac_db::{AccessLogRepository, Repository, UserNotificationRepository};
use rbac_models::{
    AccessLog, AccessLogDto, AccessLogPatch, UserNotification, UserNotificationDto,
    UserNotificationPatch,
};
use tracing::instrument;

use crate::crud::CrudService;
use crate::definition::{entity_definition, EntityDefinition};

entity_definition! {
    UserNotificationDefinition {
        entity: UserNotification,
        dto: UserNotificationDto,
        patch: UserNotificationPatch,
        contract: UserNotificationContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    AccessLogDefinition {
        entity: AccessLog,
        dto: AccessLogDto,
        patch: AccessLogPatch,
        contract: AccessLogContract,
        list_filter: ListFilter::All,
    }
}

#[derive(Clone)]
pub struct UserNotificationService {
    crud: CrudService<UserNotificationDefinition>,
    notifications: Arc<dyn UserNotificationRepository>,
}

impl UserNotificationService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<UserNotification> + UserNotificationRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            notifications: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Notifications of a user that have not been hidden
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Id) -> ServiceResult<Vec<UserNotificationDto>> {
        check_id("user_id", user_id).map_err(|e| self.crud.invalid(e))?;
        let rows = self
            .notifications
            .get_by_user_id(user_id)
            .await
            .map_err(|e| self.crud.store_failure("list_for_user", e))?;
        Ok(rows
            .iter()
            .filter(|n| !n.is_hidden)
            .map(UserNotificationDefinition::to_dto)
            .collect())
    }

    pub async fn mark_as_read(&self, id: Id) -> ServiceResult<UserNotificationDto> {
        self.crud
            .patch(id, UserNotificationPatch::new().with_read(true))
            .await
    }

    pub async fn hide(&self, id: Id) -> ServiceResult<UserNotificationDto> {
        self.crud
            .patch(id, UserNotificationPatch::new().with_hidden(true))
            .await
    }
}

impl Deref for UserNotificationService {
    type Target = CrudService<UserNotificationDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[derive(Clone)]
pub struct AccessLogService {
    crud: CrudService<AccessLogDefinition>,
    logs: Arc<dyn AccessLogRepository>,
}

impl AccessLogService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<AccessLog> + AccessLogRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            logs: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Append one entry to a user's access log
    pub async fn record(
        &self,
        user_id: Id,
        action: &str,
        status: bool,
        details: Option<String>,
    ) -> ServiceResult<AccessLogDto> {
        self.crud
            .create(AccessLogDto {
                user_id,
                action: action.to_string(),
                status,
                details,
                ..Default::default()
            })
            .await
    }

    /// Newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Id) -> ServiceResult<Vec<AccessLogDto>> {
        check_id("user_id", user_id).map_err(|e| self.crud.invalid(e))?;
        let rows = self
            .logs
            .get_by_user_id(user_id)
            .await
            .map_err(|e| self.crud.store_failure("list_for_user", e))?;
        Ok(rows.iter().map(AccessLogDefinition::to_dto).collect())
    }
}

impl Deref for AccessLogService {
    type Target = CrudService<AccessLogDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
