//! Wiring of every entity service over one set of stores

use std::sync::Arc;

use rbac_core::config::AppConfig;
use rbac_core::result::ServiceResult;
use rbac_db::MemoryRepository;
use rbac_models::{
    AccessLog, Bill, Form, InformationInfraction, Module, ModuleForm, PaymentAgreement,
    PaymentHistory, PaymentUser, Permission, Person, Role, RoleFormPermission, RoleUser,
    StateInfraction, TypeInfraction, TypePayment, User, UserNotification,
};
use tracing::info;

use crate::access::{
    FormService, ModuleFormService, ModuleService, PermissionService, RoleFormPermissionService,
    RoleService, RoleUserService,
};
use crate::activity::{AccessLogService, UserNotificationService};
use crate::identity::{PersonService, UserService};
use crate::infractions::{
    InformationInfractionService, StateInfractionService, TypeInfractionService,
};
use crate::payments::{
    BillService, PaymentAgreementService, PaymentHistoryService, PaymentUserService,
    TypePaymentService,
};

/// One service per entity kind, sharing stores where lookups cross entities
#[derive(Clone)]
pub struct Services {
    pub persons: PersonService,
    pub users: UserService,
    pub roles: RoleService,
    pub permissions: PermissionService,
    pub forms: FormService,
    pub modules: ModuleService,
    pub module_forms: ModuleFormService,
    pub role_users: RoleUserService,
    pub role_form_permissions: RoleFormPermissionService,
    pub state_infractions: StateInfractionService,
    pub type_infractions: TypeInfractionService,
    pub information_infractions: InformationInfractionService,
    pub type_payments: TypePaymentService,
    pub bills: BillService,
    pub payment_histories: PaymentHistoryService,
    pub payment_users: PaymentUserService,
    pub payment_agreements: PaymentAgreementService,
    pub user_notifications: UserNotificationService,
    pub access_logs: AccessLogService,
}

impl Services {
    /// Build every service over fresh in-memory stores, applying the
    /// configured list policy overrides.
    pub fn in_memory(config: &AppConfig) -> ServiceResult<Self> {
        let persons = Arc::new(MemoryRepository::<Person>::new());

        let services = Self {
            persons: PersonService::new(persons.clone()).with_config(config)?,
            users: UserService::new(Arc::new(MemoryRepository::<User>::new()), persons.clone())
                .with_config(config)?,
            roles: RoleService::new(Arc::new(MemoryRepository::<Role>::new()))
                .with_config(config)?,
            permissions: PermissionService::new(Arc::new(MemoryRepository::<Permission>::new()))
                .with_config(config)?,
            forms: FormService::new(Arc::new(MemoryRepository::<Form>::new()))
                .with_config(config)?,
            modules: ModuleService::new(Arc::new(MemoryRepository::<Module>::new()))
                .with_config(config)?,
            module_forms: ModuleFormService::new(Arc::new(MemoryRepository::<ModuleForm>::new()))
                .with_config(config)?,
            role_users: RoleUserService::new(Arc::new(MemoryRepository::<RoleUser>::new()))
                .with_config(config)?,
            role_form_permissions: RoleFormPermissionService::new(Arc::new(
                MemoryRepository::<RoleFormPermission>::new(),
            ))
            .with_config(config)?,
            state_infractions: StateInfractionService::new(
                Arc::new(MemoryRepository::<StateInfraction>::new()),
                persons,
            )
            .with_config(config)?,
            type_infractions: TypeInfractionService::new(Arc::new(
                MemoryRepository::<TypeInfraction>::new(),
            ))
            .with_config(config)?,
            information_infractions: InformationInfractionService::new(Arc::new(
                MemoryRepository::<InformationInfraction>::new(),
            ))
            .with_config(config)?,
            type_payments: TypePaymentService::new(Arc::new(
                MemoryRepository::<TypePayment>::new(),
            ))
            .with_config(config)?,
            bills: BillService::new(Arc::new(MemoryRepository::<Bill>::new()))
                .with_config(config)?,
            payment_histories: PaymentHistoryService::new(Arc::new(
                MemoryRepository::<PaymentHistory>::new(),
            ))
            .with_config(config)?,
            payment_users: PaymentUserService::new(Arc::new(
                MemoryRepository::<PaymentUser>::new(),
            ))
            .with_config(config)?,
            payment_agreements: PaymentAgreementService::new(Arc::new(
                MemoryRepository::<PaymentAgreement>::new(),
            ))
            .with_config(config)?,
            user_notifications: UserNotificationService::new(Arc::new(
                MemoryRepository::<UserNotification>::new(),
            ))
            .with_config(config)?,
            access_logs: AccessLogService::new(Arc::new(MemoryRepository::<AccessLog>::new()))
                .with_config(config)?,
        };

        info!(overrides = config.policies.len(), "Services ready");
        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbac_core::policy::ListFilter;
    use rbac_models::{ModuleDto, PersonDto, UserDto};

    #[tokio::test]
    async fn test_users_see_persons_store() {
        let services = Services::in_memory(&AppConfig::default()).unwrap();
        let person = services
            .persons
            .create(PersonDto {
                first_name: "Bob".to_string(),
                last_name: "Stone".to_string(),
                phone: "3001234567".to_string(),
                document_number: "1020304050".to_string(),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();

        let user = services
            .users
            .create(UserDto {
                username: "bob".to_string(),
                email: "b@x.com".to_string(),
                password: Some("pw".to_string()),
                person_id: person.id,
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(user.person_id, person.id);
    }

    #[tokio::test]
    async fn test_config_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .policies
            .insert("module".to_string(), ListFilter::ActiveOnly);
        let services = Services::in_memory(&config).unwrap();
        assert_eq!(services.modules.list_filter(), ListFilter::ActiveOnly);

        let module = services
            .modules
            .create(ModuleDto {
                name: "Security".to_string(),
                status: true,
                ..Default::default()
            })
            .await
            .unwrap();
        services.modules.set_active_status(module.id, false).await.unwrap();
        assert!(services.modules.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = AppConfig::default();
        config
            .policies
            .insert("bill".to_string(), ListFilter::ActiveOnly);
        assert!(Services::in_memory(&config).is_err());
    }
}
