//! Seed file loading
//!
//! A seed file is one JSON object with an optional array per entity kind,
//! using the DTO wire format. Records are created through the services in
//! dependency order, so ids are assigned 1, 2, ... per kind in file order and
//! later sections may refer to earlier rows by those ids.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use rbac_core::traits::Entity;
use rbac_models::{
    AccessLogDto, BillDto, FormDto, InformationInfractionDto, ModuleDto, ModuleFormDto,
    PaymentAgreementDto, PaymentHistoryDto, PaymentUserDto, PermissionDto, PersonDto, RoleDto,
    RoleFormPermissionDto, RoleUserDto, StateInfractionDto, TypeInfractionDto, TypePaymentDto,
    UserDto, UserNotificationDto,
};
use rbac_services::{CrudService, EntityDefinition, Services};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub persons: Vec<PersonDto>,
    pub users: Vec<UserDto>,
    pub roles: Vec<RoleDto>,
    pub permissions: Vec<PermissionDto>,
    pub forms: Vec<FormDto>,
    pub modules: Vec<ModuleDto>,
    pub module_forms: Vec<ModuleFormDto>,
    pub role_users: Vec<RoleUserDto>,
    pub role_form_permissions: Vec<RoleFormPermissionDto>,
    pub type_infractions: Vec<TypeInfractionDto>,
    pub information_infractions: Vec<InformationInfractionDto>,
    pub state_infractions: Vec<StateInfractionDto>,
    pub type_payments: Vec<TypePaymentDto>,
    pub bills: Vec<BillDto>,
    pub payment_histories: Vec<PaymentHistoryDto>,
    pub payment_users: Vec<PaymentUserDto>,
    pub payment_agreements: Vec<PaymentAgreementDto>,
    pub user_notifications: Vec<UserNotificationDto>,
    pub access_logs: Vec<AccessLogDto>,
}

impl SeedData {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }
}

/// Outcome of seeding one entity kind
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct SeedOutcome {
    pub created: usize,
    /// Rejected records counted by error code
    pub rejected: BTreeMap<&'static str, usize>,
}

impl SeedOutcome {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

async fn load<D: EntityDefinition>(
    service: &CrudService<D>,
    rows: Vec<D::Dto>,
) -> SeedOutcome {
    let entity = <D::Entity as Entity>::TYPE_NAME;
    let mut outcome = SeedOutcome::default();
    for (index, row) in rows.into_iter().enumerate() {
        match service.create(row).await {
            Ok(_) => outcome.created += 1,
            Err(err) => {
                warn!(entity, index, error = %err, "Seed record rejected");
                *outcome.rejected.entry(err.error_code()).or_default() += 1;
            }
        }
    }
    outcome
}

/// Create every record of `seed` through `services`, keyed by entity name
pub async fn apply(services: &Services, seed: SeedData) -> BTreeMap<&'static str, SeedOutcome> {
    let mut outcomes = BTreeMap::new();

    outcomes.insert("Person", load(&services.persons, seed.persons).await);
    outcomes.insert("User", load(&*services.users, seed.users).await);
    outcomes.insert("Role", load(&services.roles, seed.roles).await);
    outcomes.insert("Permission", load(&services.permissions, seed.permissions).await);
    outcomes.insert("Form", load(&services.forms, seed.forms).await);
    outcomes.insert("Module", load(&services.modules, seed.modules).await);
    outcomes.insert("ModuleForm", load(&*services.module_forms, seed.module_forms).await);
    outcomes.insert("RoleUser", load(&*services.role_users, seed.role_users).await);
    outcomes.insert(
        "RoleFormPermission",
        load(&*services.role_form_permissions, seed.role_form_permissions).await,
    );
    outcomes.insert(
        "TypeInfraction",
        load(&services.type_infractions, seed.type_infractions).await,
    );
    outcomes.insert(
        "InformationInfraction",
        load(&*services.information_infractions, seed.information_infractions).await,
    );
    outcomes.insert(
        "StateInfraction",
        load(&*services.state_infractions, seed.state_infractions).await,
    );
    outcomes.insert("TypePayment", load(&services.type_payments, seed.type_payments).await);
    outcomes.insert("Bill", load(&*services.bills, seed.bills).await);
    outcomes.insert(
        "PaymentHistory",
        load(&services.payment_histories, seed.payment_histories).await,
    );
    outcomes.insert("PaymentUser", load(&services.payment_users, seed.payment_users).await);
    outcomes.insert(
        "PaymentAgreement",
        load(&services.payment_agreements, seed.payment_agreements).await,
    );
    outcomes.insert(
        "UserNotification",
        load(&*services.user_notifications, seed.user_notifications).await,
    );
    outcomes.insert("AccessLog", load(&*services.access_logs, seed.access_logs).await);

    let created: usize = outcomes.values().map(|o| o.created).sum();
    let rejected: usize = outcomes.values().map(SeedOutcome::rejected_total).sum();
    info!(created, rejected, "Seed applied");
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbac_core::config::AppConfig;

    const SEED: &str = r#"{
        "persons": [
            { "firstName": "Bob", "lastName": "Stone", "phone": "3001234567",
              "documentNumber": "1020304050", "isActive": true }
        ],
        "users": [
            { "username": "bob", "email": "b@x.com", "password": "pw", "personId": 1, "isActive": true },
            { "username": "ghost", "email": "g@x.com", "password": "pw", "personId": 999, "isActive": true },
            { "username": "", "email": "nobody@x.com", "password": "pw", "personId": 1 }
        ],
        "roles": [ { "roleName": "admin", "isActive": true } ]
    }"#;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let seed: SeedData = serde_json::from_str(SEED).unwrap();
        assert_eq!(seed.persons.len(), 1);
        assert_eq!(seed.users.len(), 3);
        assert!(seed.bills.is_empty());
    }

    #[tokio::test]
    async fn test_apply_counts_outcomes() {
        let services = Services::in_memory(&AppConfig::default()).unwrap();
        let seed: SeedData = serde_json::from_str(SEED).unwrap();

        let outcomes = apply(&services, seed).await;
        assert_eq!(outcomes["Person"].created, 1);
        assert_eq!(outcomes["User"].created, 1);
        assert_eq!(outcomes["User"].rejected.get("validation_failed"), Some(&2));
        assert_eq!(outcomes["Role"].created, 1);
        assert_eq!(outcomes["Bill"], SeedOutcome::default());
    }
}
