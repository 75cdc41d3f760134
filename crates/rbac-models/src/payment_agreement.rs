//! Payment agreement model
//!
//! An instalment plan a user signs to pay off outstanding fines.

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentAgreement {
    pub id: Id,
    pub user_id: Id,
    pub type_payment_id: Id,
    pub description: String,
    pub finance_amount: Decimal,
    pub installments: i32,
    pub agreement_start: NaiveDate,
    pub agreement_end: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(PaymentAgreement);
transfer!(PaymentAgreementDto);

impl Entity for PaymentAgreement {
    const TYPE_NAME: &'static str = "PaymentAgreement";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for PaymentAgreement {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl PaymentAgreement {
    /// Amount due per instalment, rounded to cents
    pub fn installment_value(&self) -> Decimal {
        if self.installments <= 0 {
            return self.finance_amount;
        }
        (self.finance_amount / Decimal::from(self.installments)).round_dp(2)
    }

    /// Expects a validated DTO (both dates present).
    pub fn from_dto(dto: &PaymentAgreementDto, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            id: 0,
            user_id: dto.user_id,
            type_payment_id: dto.type_payment_id,
            description: dto.description.trim().to_string(),
            finance_amount: dto.finance_amount,
            installments: dto.installments,
            agreement_start: dto.agreement_start.unwrap_or(today),
            agreement_end: dto.agreement_end.unwrap_or(today),
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &PaymentAgreementDto) {
        self.user_id = dto.user_id;
        self.type_payment_id = dto.type_payment_id;
        self.description = dto.description.trim().to_string();
        self.finance_amount = dto.finance_amount;
        self.installments = dto.installments;
        if let Some(agreement_start) = dto.agreement_start {
            self.agreement_start = agreement_start;
        }
        if let Some(agreement_end) = dto.agreement_end {
            self.agreement_end = agreement_end;
        }
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &PaymentAgreementPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(type_payment_id) = patch.type_payment_id {
            self.type_payment_id = type_payment_id;
        }
        if let Some(ref description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(finance_amount) = patch.finance_amount {
            self.finance_amount = finance_amount;
        }
        if let Some(installments) = patch.installments {
            self.installments = installments;
        }
        if let Some(agreement_start) = patch.agreement_start {
            self.agreement_start = agreement_start;
        }
        if let Some(agreement_end) = patch.agreement_end {
            self.agreement_end = agreement_end;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAgreementDto {
    #[serde(default)]
    pub id: Id,

    pub user_id: Id,

    pub type_payment_id: Id,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,

    pub finance_amount: Decimal,

    pub installments: i32,

    #[serde(default)]
    pub agreement_start: Option<NaiveDate>,

    #[serde(default)]
    pub agreement_end: Option<NaiveDate>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&PaymentAgreement> for PaymentAgreementDto {
    fn from(agreement: &PaymentAgreement) -> Self {
        Self {
            id: agreement.id,
            user_id: agreement.user_id,
            type_payment_id: agreement.type_payment_id,
            description: agreement.description.clone(),
            finance_amount: agreement.finance_amount,
            installments: agreement.installments,
            agreement_start: Some(agreement.agreement_start),
            agreement_end: Some(agreement.agreement_end),
            is_active: agreement.is_active,
            row_version: agreement.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentAgreementPatch {
    pub user_id: Option<Id>,
    pub type_payment_id: Option<Id>,
    pub description: Option<String>,
    pub finance_amount: Option<Decimal>,
    pub installments: Option<i32>,
    pub agreement_start: Option<NaiveDate>,
    pub agreement_end: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl PaymentAgreementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_type_payment_id(mut self, type_payment_id: Id) -> Self {
        self.type_payment_id = Some(type_payment_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_finance_amount(mut self, finance_amount: Decimal) -> Self {
        self.finance_amount = Some(finance_amount);
        self
    }

    pub fn with_installments(mut self, installments: i32) -> Self {
        self.installments = Some(installments);
        self
    }

    pub fn with_agreement_start(mut self, agreement_start: NaiveDate) -> Self {
        self.agreement_start = Some(agreement_start);
        self
    }

    pub fn with_agreement_end(mut self, agreement_end: NaiveDate) -> Self {
        self.agreement_end = Some(agreement_end);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installment_value_rounds_to_cents() {
        let agreement = PaymentAgreement::from_dto(
            &PaymentAgreementDto {
                user_id: 1,
                type_payment_id: 1,
                finance_amount: Decimal::new(100_000, 0),
                installments: 3,
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(agreement.installment_value(), Decimal::new(3_333_333, 2));
    }
}
