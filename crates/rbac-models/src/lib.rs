//! # rbac-models
//!
//! Entity and DTO models for the RBAC admin service layer.
//!
//! Each module holds three shapes for one entity kind:
//! - the persisted entity (what the store keeps)
//! - the DTO (what callers send and receive)
//! - the patch (partial update; only `Some` fields are applied)
//!
//! Entity → DTO mapping is an explicit field-by-field projection, so a DTO
//! never exposes fields outside its own contract.

pub use rbac_core::traits::{ActiveFlag, Dto, Entity, Id, Identifiable, Timestamped, Versioned};

/// Implements the identity, row-version and timestamp traits for an entity
/// struct with `id`, `row_version` and `created_at` fields.
macro_rules! persisted {
    ($ty:ty) => {
        impl $crate::Identifiable for $ty {
            fn id(&self) -> $crate::Id {
                self.id
            }
            fn set_id(&mut self, id: $crate::Id) {
                self.id = id;
            }
        }

        impl $crate::Versioned for $ty {
            fn row_version(&self) -> i64 {
                self.row_version
            }
            fn set_row_version(&mut self, version: i64) {
                self.row_version = version;
            }
        }

        impl $crate::Timestamped for $ty {
            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.created_at
            }
            fn set_created_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = at;
            }
        }
    };
}

/// Implements [`Dto`] for a transfer struct with `id` and `row_version` fields.
macro_rules! transfer {
    ($ty:ty) => {
        impl $crate::Dto for $ty {
            fn id(&self) -> $crate::Id {
                self.id
            }
            fn row_version(&self) -> i64 {
                self.row_version
            }
        }
    };
}

pub mod user;
pub mod person;
pub mod role;
pub mod permission;
pub mod form;
pub mod module;
pub mod module_form;
pub mod role_user;
pub mod role_form_permission;
pub mod state_infraction;
pub mod type_infraction;
pub mod information_infraction;
pub mod type_payment;
pub mod bill;
pub mod payment_history;
pub mod payment_user;
pub mod payment_agreement;
pub mod user_notification;
pub mod access_log;

pub use user::{User, UserDto, UserPatch};
pub use person::{Person, PersonDto, PersonPatch};
pub use role::{Role, RoleDto, RolePatch};
pub use permission::{Permission, PermissionDto, PermissionPatch};
pub use form::{Form, FormDto, FormPatch};
pub use module::{Module, ModuleDto, ModulePatch};
pub use module_form::{ModuleForm, ModuleFormDto, ModuleFormPatch};
pub use role_user::{RoleUser, RoleUserDto, RoleUserPatch};
pub use role_form_permission::{
    FormAction, RoleFormPermission, RoleFormPermissionDto, RoleFormPermissionPatch,
};
pub use state_infraction::{StateInfraction, StateInfractionDto, StateInfractionPatch};
pub use type_infraction::{TypeInfraction, TypeInfractionDto, TypeInfractionPatch};
pub use information_infraction::{
    InformationInfraction, InformationInfractionDto, InformationInfractionPatch,
};
pub use type_payment::{TypePayment, TypePaymentDto, TypePaymentPatch};
pub use bill::{Bill, BillDto, BillPatch, BillState};
pub use payment_history::{PaymentHistory, PaymentHistoryDto, PaymentHistoryPatch};
pub use payment_user::{PaymentUser, PaymentUserDto, PaymentUserPatch};
pub use payment_agreement::{PaymentAgreement, PaymentAgreementDto, PaymentAgreementPatch};
pub use user_notification::{UserNotification, UserNotificationDto, UserNotificationPatch};
pub use access_log::{AccessLog, AccessLogDto, AccessLogPatch};
