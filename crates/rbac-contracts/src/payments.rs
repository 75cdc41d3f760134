//! Contracts for bills, payments and payment agreements
//!
//! Bills and agreements carry a date range. A patch may move only one end
//! of the range, so their contracts also validate the merged entity.

use rbac_core::error::ValidationErrors;
use rbac_models::{
    Bill, BillDto, BillPatch, PaymentAgreement, PaymentAgreementDto, PaymentAgreementPatch,
    PaymentHistoryDto, PaymentHistoryPatch, PaymentUserDto, PaymentUserPatch, TypePaymentDto,
    TypePaymentPatch,
};

use crate::base::*;

pub struct TypePaymentContract;

impl Contract<TypePaymentDto> for TypePaymentContract {
    fn validate(&self, dto: &TypePaymentDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("name", &dto.name, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<TypePaymentPatch> for TypePaymentContract {
    fn validate(&self, patch: &TypePaymentPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("name", patch.name.as_deref(), &mut errors);
        max_length("name", patch.name.as_deref(), 100, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        errors.into_result()
    }
}

pub struct BillContract;

impl Contract<BillDto> for BillContract {
    fn validate(&self, dto: &BillDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_text("barcode", &dto.barcode, &mut errors);
        require_format("barcode", &dto.barcode, &BARCODE_PATTERN, &mut errors);
        require_date("issue_date", dto.issue_date, &mut errors);
        require_date("expiration_date", dto.expiration_date, &mut errors);
        date_order("expiration_date", dto.issue_date, dto.expiration_date, &mut errors);
        require_positive("total_value", dto.total_value, &mut errors);
        require_id("user_id", dto.user_id, &mut errors);
        derived_rules(dto, &mut errors);

        errors.into_result()
    }
}

impl Contract<BillPatch> for BillContract {
    fn validate(&self, patch: &BillPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Some(barcode) = patch.barcode.as_deref() {
            require_text("barcode", barcode, &mut errors);
            require_format("barcode", barcode, &BARCODE_PATTERN, &mut errors);
        }
        date_order("expiration_date", patch.issue_date, patch.expiration_date, &mut errors);
        optional_positive("total_value", patch.total_value, &mut errors);
        optional_id("user_id", patch.user_id, &mut errors);

        errors.into_result()
    }
}

impl Contract<Bill> for BillContract {
    fn validate(&self, bill: &Bill) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        date_order(
            "expiration_date",
            Some(bill.issue_date),
            Some(bill.expiration_date),
            &mut errors,
        );
        errors.into_result()
    }
}

pub struct PaymentHistoryContract;

impl Contract<PaymentHistoryDto> for PaymentHistoryContract {
    fn validate(&self, dto: &PaymentHistoryDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("user_id", dto.user_id, &mut errors);
        require_id("bill_id", dto.bill_id, &mut errors);
        require_positive("amount", dto.amount, &mut errors);
        require_date("payment_date", dto.payment_date, &mut errors);
        errors.into_result()
    }
}

impl Contract<PaymentHistoryPatch> for PaymentHistoryContract {
    fn validate(&self, patch: &PaymentHistoryPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("user_id", patch.user_id, &mut errors);
        optional_id("bill_id", patch.bill_id, &mut errors);
        optional_positive("amount", patch.amount, &mut errors);
        errors.into_result()
    }
}

pub struct PaymentUserContract;

impl Contract<PaymentUserDto> for PaymentUserContract {
    fn validate(&self, dto: &PaymentUserDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_id("person_id", dto.person_id, &mut errors);
        require_id("type_payment_id", dto.type_payment_id, &mut errors);
        require_positive("amount", dto.amount, &mut errors);
        require_date("payment_date", dto.payment_date, &mut errors);
        errors.into_result()
    }
}

impl Contract<PaymentUserPatch> for PaymentUserContract {
    fn validate(&self, patch: &PaymentUserPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_id("person_id", patch.person_id, &mut errors);
        optional_id("type_payment_id", patch.type_payment_id, &mut errors);
        optional_positive("amount", patch.amount, &mut errors);
        errors.into_result()
    }
}

pub struct PaymentAgreementContract;

impl Contract<PaymentAgreementDto> for PaymentAgreementContract {
    fn validate(&self, dto: &PaymentAgreementDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_id("user_id", dto.user_id, &mut errors);
        require_id("type_payment_id", dto.type_payment_id, &mut errors);
        require_positive("finance_amount", dto.finance_amount, &mut errors);
        require_count("installments", dto.installments, &mut errors);
        require_date("agreement_start", dto.agreement_start, &mut errors);
        require_date("agreement_end", dto.agreement_end, &mut errors);
        date_order("agreement_end", dto.agreement_start, dto.agreement_end, &mut errors);
        derived_rules(dto, &mut errors);

        errors.into_result()
    }
}

impl Contract<PaymentAgreementPatch> for PaymentAgreementContract {
    fn validate(&self, patch: &PaymentAgreementPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        optional_id("user_id", patch.user_id, &mut errors);
        optional_id("type_payment_id", patch.type_payment_id, &mut errors);
        max_length("description", patch.description.as_deref(), 500, &mut errors);
        optional_positive("finance_amount", patch.finance_amount, &mut errors);
        optional_count("installments", patch.installments, &mut errors);
        date_order("agreement_end", patch.agreement_start, patch.agreement_end, &mut errors);

        errors.into_result()
    }
}

impl Contract<PaymentAgreement> for PaymentAgreementContract {
    fn validate(&self, agreement: &PaymentAgreement) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        date_order(
            "agreement_end",
            Some(agreement.agreement_start),
            Some(agreement.agreement_end),
            &mut errors,
        );
        errors.into_result()
    }
}
