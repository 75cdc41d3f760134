//! Payment made by a person with a given payment type

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentUser {
    pub id: Id,
    pub person_id: Id,
    pub type_payment_id: Id,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(PaymentUser);
transfer!(PaymentUserDto);

impl Entity for PaymentUser {
    const TYPE_NAME: &'static str = "PaymentUser";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for PaymentUser {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl PaymentUser {
    pub fn from_dto(dto: &PaymentUserDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            person_id: dto.person_id,
            type_payment_id: dto.type_payment_id,
            amount: dto.amount,
            payment_date: dto.payment_date.unwrap_or_else(|| now.date_naive()),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &PaymentUserDto) {
        self.person_id = dto.person_id;
        self.type_payment_id = dto.type_payment_id;
        self.amount = dto.amount;
        if let Some(payment_date) = dto.payment_date {
            self.payment_date = payment_date;
        }
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &PaymentUserPatch) {
        if let Some(person_id) = patch.person_id {
            self.person_id = person_id;
        }
        if let Some(type_payment_id) = patch.type_payment_id {
            self.type_payment_id = type_payment_id;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(payment_date) = patch.payment_date {
            self.payment_date = payment_date;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUserDto {
    #[serde(default)]
    pub id: Id,
    pub person_id: Id,
    pub type_payment_id: Id,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&PaymentUser> for PaymentUserDto {
    fn from(payment: &PaymentUser) -> Self {
        Self {
            id: payment.id,
            person_id: payment.person_id,
            type_payment_id: payment.type_payment_id,
            amount: payment.amount,
            payment_date: Some(payment.payment_date),
            is_active: payment.is_active,
            row_version: payment.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentUserPatch {
    pub person_id: Option<Id>,
    pub type_payment_id: Option<Id>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl PaymentUserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person_id(mut self, person_id: Id) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn with_type_payment_id(mut self, type_payment_id: Id) -> Self {
        self.type_payment_id = Some(type_payment_id);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_payment_date(mut self, payment_date: NaiveDate) -> Self {
        self.payment_date = Some(payment_date);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
