//! Payment history model

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentHistory {
    pub id: Id,
    pub user_id: Id,
    pub bill_id: Id,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(PaymentHistory);
transfer!(PaymentHistoryDto);

impl Entity for PaymentHistory {
    const TYPE_NAME: &'static str = "PaymentHistory";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for PaymentHistory {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl PaymentHistory {
    pub fn from_dto(dto: &PaymentHistoryDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id: dto.user_id,
            bill_id: dto.bill_id,
            amount: dto.amount,
            payment_date: dto.payment_date.unwrap_or_else(|| now.date_naive()),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &PaymentHistoryDto) {
        self.user_id = dto.user_id;
        self.bill_id = dto.bill_id;
        self.amount = dto.amount;
        if let Some(payment_date) = dto.payment_date {
            self.payment_date = payment_date;
        }
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &PaymentHistoryPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(bill_id) = patch.bill_id {
            self.bill_id = bill_id;
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
pub struct PaymentHistoryDto {
    #[serde(default)]
    pub id: Id,
    pub user_id: Id,
    pub bill_id: Id,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&PaymentHistory> for PaymentHistoryDto {
    fn from(payment: &PaymentHistory) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            bill_id: payment.bill_id,
            amount: payment.amount,
            payment_date: Some(payment.payment_date),
            is_active: payment.is_active,
            row_version: payment.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentHistoryPatch {
    pub user_id: Option<Id>,
    pub bill_id: Option<Id>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl PaymentHistoryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_bill_id(mut self, bill_id: Id) -> Self {
        self.bill_id = Some(bill_id);
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
