//! # rbac-contracts
//!
//! Input contracts for the RBAC admin service layer.
//!
//! A contract checks a DTO or patch before anything touches the store and
//! records every failure in a [`ValidationErrors`] collection. Services
//! surface the first recorded error as a `ServiceError::Validation`.

pub mod base;
pub mod identity;
pub mod access;
pub mod infractions;
pub mod payments;
pub mod activity;

pub use base::*;
pub use identity::{PersonContract, UserContract};
pub use access::{
    FormContract, ModuleContract, ModuleFormContract, PermissionContract, RoleContract,
    RoleFormPermissionContract, RoleUserContract,
};
pub use infractions::{
    InformationInfractionContract, StateInfractionContract, TypeInfractionContract,
};
pub use payments::{
    BillContract, PaymentAgreementContract, PaymentHistoryContract, PaymentUserContract,
    TypePaymentContract,
};
pub use activity::{AccessLogContract, UserNotificationContract};

pub use rbac_core::error::ValidationErrors;
