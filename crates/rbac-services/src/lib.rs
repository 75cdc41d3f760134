//! # rbac-services
//!
//! Business services for the RBAC admin service layer.
//!
//! Every entity service is a [`CrudService`] driven by an
//! [`EntityDefinition`]: contracts run before the store is touched, failures
//! map onto the `ServiceError` taxonomy, and each outcome is logged with the
//! entity name and id. Services that need more than CRUD wrap the generic one
//! and deref to it.

pub mod definition;
pub mod guard;
pub mod crud;
pub mod identity;
pub mod access;
pub mod infractions;
pub mod payments;
pub mod activity;
pub mod registry;

pub use definition::EntityDefinition;
pub use guard::{ActivePersonGuard, PersonExistsGuard, WriteGuard};
pub use crud::CrudService;
pub use identity::{PersonService, UserService};
pub use access::{
    FormService, ModuleFormService, ModuleService, PermissionService,
    RoleFormPermissionService, RoleService, RoleUserService,
};
pub use infractions::{
    InformationInfractionService, StateInfractionService, TypeInfractionService,
};
pub use payments::{
    BillService, PaymentAgreementService, PaymentHistoryService, PaymentUserService,
    TypePaymentService,
};
pub use activity::{AccessLogService, UserNotificationService};
pub use registry::Services;
