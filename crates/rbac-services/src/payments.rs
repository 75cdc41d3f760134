//! Payment services: catalogue of payment types, bills, payments and agreements

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rbac_contracts::{
    BillContract, Contract, PaymentAgreementContract, PaymentHistoryContract, PaymentUserContract,
    TypePaymentContract, ValidationErrors, ValidationResult, WriteMode,
};
use rbac_core::config::AppConfig;
use rbac_core::policy::ListFilter;
use rbac_core::result::ServiceResult;
use rbac_db::{BillRepository, Repository};
use rbac_models::{
    Bill, BillDto, BillPatch, PaymentAgreement, PaymentAgreementDto, PaymentAgreementPatch,
    PaymentHistory, PaymentHistoryDto, PaymentHistoryPatch, PaymentUser, PaymentUserDto,
    PaymentUserPatch, TypePayment, TypePaymentDto, TypePaymentPatch,
};
use tracing::{debug, instrument};

use crate::crud::CrudService;
use crate::definition::{entity_definition, EntityDefinition};

entity_definition! {
    TypePaymentDefinition {
        entity: TypePayment,
        dto: TypePaymentDto,
        patch: TypePaymentPatch,
        contract: TypePaymentContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

entity_definition! {
    PaymentHistoryDefinition {
        entity: PaymentHistory,
        dto: PaymentHistoryDto,
        patch: PaymentHistoryPatch,
        contract: PaymentHistoryContract,
        list_filter: ListFilter::All,
    }
}

entity_definition! {
    PaymentUserDefinition {
        entity: PaymentUser,
        dto: PaymentUserDto,
        patch: PaymentUserPatch,
        contract: PaymentUserContract,
        list_filter: ListFilter::ActiveOnly,
    }
}

/// Bills re-check date order on the merged row, since a patch may move only one end.
pub struct BillDefinition;

impl EntityDefinition for BillDefinition {
    type Entity = Bill;
    type Dto = BillDto;
    type Patch = BillPatch;

    const DEFAULT_LIST_FILTER: ListFilter = ListFilter::All;

    fn validate(dto: &BillDto, _mode: WriteMode) -> ValidationResult {
        BillContract.validate(dto)
    }

    fn validate_patch(patch: &BillPatch) -> ValidationResult {
        BillContract.validate(patch)
    }

    fn validate_merged(bill: &Bill) -> ValidationResult {
        BillContract.validate(bill)
    }

    fn new_entity(dto: &BillDto, now: DateTime<Utc>) -> Bill {
        Bill::from_dto(dto, now)
    }

    fn apply_update(bill: &mut Bill, dto: &BillDto) {
        bill.apply_dto(dto);
    }

    fn apply_patch(bill: &mut Bill, patch: &BillPatch) {
        bill.apply_patch(patch);
    }

    fn to_dto(bill: &Bill) -> BillDto {
        BillDto::from(bill)
    }
}

pub struct PaymentAgreementDefinition;

impl EntityDefinition for PaymentAgreementDefinition {
    type Entity = PaymentAgreement;
    type Dto = PaymentAgreementDto;
    type Patch = PaymentAgreementPatch;

    const DEFAULT_LIST_FILTER: ListFilter = ListFilter::ActiveOnly;

    fn validate(dto: &PaymentAgreementDto, _mode: WriteMode) -> ValidationResult {
        PaymentAgreementContract.validate(dto)
    }

    fn validate_patch(patch: &PaymentAgreementPatch) -> ValidationResult {
        PaymentAgreementContract.validate(patch)
    }

    fn validate_merged(agreement: &PaymentAgreement) -> ValidationResult {
        PaymentAgreementContract.validate(agreement)
    }

    fn new_entity(dto: &PaymentAgreementDto, now: DateTime<Utc>) -> PaymentAgreement {
        PaymentAgreement::from_dto(dto, now)
    }

    fn apply_update(agreement: &mut PaymentAgreement, dto: &PaymentAgreementDto) {
        agreement.apply_dto(dto);
    }

    fn apply_patch(agreement: &mut PaymentAgreement, patch: &PaymentAgreementPatch) {
        agreement.apply_patch(patch);
    }

    fn to_dto(agreement: &PaymentAgreement) -> PaymentAgreementDto {
        PaymentAgreementDto::from(agreement)
    }
}

pub type TypePaymentService = CrudService<TypePaymentDefinition>;
pub type PaymentHistoryService = CrudService<PaymentHistoryDefinition>;
pub type PaymentUserService = CrudService<PaymentUserDefinition>;
pub type PaymentAgreementService = CrudService<PaymentAgreementDefinition>;

#[derive(Clone)]
pub struct BillService {
    crud: CrudService<BillDefinition>,
    bills: Arc<dyn BillRepository>,
}

impl BillService {
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: Repository<Bill> + BillRepository + 'static,
    {
        Self {
            crud: CrudService::new(repo.clone()),
            bills: repo,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.crud = self.crud.with_config(config)?;
        Ok(self)
    }

    /// Bill carrying `barcode`, if any
    #[instrument(skip(self))]
    pub async fn get_by_barcode(&self, barcode: &str) -> ServiceResult<Option<BillDto>> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("barcode", "can't be blank");
            return Err(self.crud.invalid(errors));
        }

        let bill = self
            .bills
            .get_by_barcode(barcode)
            .await
            .map_err(|e| self.crud.store_failure("get_by_barcode", e))?;
        if bill.is_none() {
            debug!(barcode, "No bill with barcode");
        }
        Ok(bill.as_ref().map(BillDefinition::to_dto))
    }
}

impl Deref for BillService {
    type Target = CrudService<BillDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rbac_db::MemoryRepository;
    use rbac_models::BillState;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(barcode: &str) -> BillDto {
        BillDto {
            barcode: barcode.to_string(),
            issue_date: Some(date(2024, 1, 10)),
            expiration_date: Some(date(2024, 2, 10)),
            total_value: Decimal::new(250_000, 0),
            user_id: 7,
            ..Default::default()
        }
    }

    fn agreement() -> PaymentAgreementDto {
        PaymentAgreementDto {
            user_id: 7,
            type_payment_id: 1,
            description: "Fine refinancing".to_string(),
            finance_amount: Decimal::new(100_000, 0),
            installments: 3,
            agreement_start: Some(date(2024, 1, 1)),
            agreement_end: Some(date(2024, 6, 30)),
            is_active: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bill_barcode_lookup() {
        let service = BillService::new(Arc::new(MemoryRepository::<Bill>::new()));
        let created = service.create(bill("7701234567890")).await.unwrap();
        assert_eq!(created.state, BillState::Pending);

        let found = service.get_by_barcode(" 7701234567890 ").await.unwrap();
        assert_eq!(found.map(|b| b.id), Some(created.id));
        assert!(service.get_by_barcode("7709999999999").await.unwrap().is_none());
        assert_eq!(
            service.get_by_barcode("").await.unwrap_err().field(),
            Some("barcode")
        );
    }

    #[tokio::test]
    async fn test_bill_patch_cannot_invert_dates() {
        let repo = Arc::new(MemoryRepository::<Bill>::new());
        let service = BillService::new(repo.clone());
        let created = service.create(bill("7701234567890")).await.unwrap();

        let err = service
            .patch(created.id, BillPatch::new().with_expiration_date(date(2023, 12, 31)))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("expiration_date"));

        let stored = service.get(created.id).await.unwrap();
        assert_eq!(stored.expiration_date, Some(date(2024, 2, 10)));
        assert_eq!(stored.row_version, 1);
    }

    #[tokio::test]
    async fn test_bill_state_patch() {
        let service = BillService::new(Arc::new(MemoryRepository::<Bill>::new()));
        let created = service.create(bill("7701234567890")).await.unwrap();
        let paid = service
            .patch(created.id, BillPatch::new().with_state(BillState::Paid))
            .await
            .unwrap();
        assert_eq!(paid.state, BillState::Paid);
        assert_eq!(paid.row_version, 2);
    }

    #[tokio::test]
    async fn test_agreement_rules() {
        let service =
            PaymentAgreementService::new(Arc::new(MemoryRepository::<PaymentAgreement>::new()));

        let err = service
            .create(PaymentAgreementDto {
                installments: 0,
                ..agreement()
            })
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("installments"));

        let err = service
            .create(PaymentAgreementDto {
                agreement_end: Some(date(2023, 12, 1)),
                ..agreement()
            })
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("agreement_end"));

        let created = service.create(agreement()).await.unwrap();
        let err = service
            .patch(created.id, PaymentAgreementPatch::new().with_agreement_start(date(2025, 1, 1)))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("agreement_end"));
    }

    #[tokio::test]
    async fn test_payment_list_policies() {
        let history =
            PaymentHistoryService::new(Arc::new(MemoryRepository::<PaymentHistory>::new()));
        let payers = PaymentUserService::new(Arc::new(MemoryRepository::<PaymentUser>::new()));

        let payment = history
            .create(PaymentHistoryDto {
                user_id: 7,
                bill_id: 1,
                amount: Decimal::new(50_000, 0),
                payment_date: Some(date(2024, 1, 20)),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let payer = payers
            .create(PaymentUserDto {
                person_id: 3,
                type_payment_id: 1,
                amount: Decimal::new(50_000, 0),
                payment_date: Some(date(2024, 1, 20)),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();

        history.set_active_status(payment.id, false).await.unwrap();
        payers.set_active_status(payer.id, false).await.unwrap();

        assert_eq!(history.list().await.unwrap().len(), 1);
        assert!(payers.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_type_payment_rename() {
        let service = TypePaymentService::new(Arc::new(MemoryRepository::<TypePayment>::new()));
        let created = service
            .create(TypePaymentDto {
                name: "Cash".to_string(),
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let renamed = service
            .patch(created.id, TypePaymentPatch::new().with_name("Bank transfer"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Bank transfer");
        assert_eq!(service.list().await.unwrap().len(), 1);

        service.set_active_status(created.id, false).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(!service.get(created.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_inactive_agreements_leave_the_list() {
        let service =
            PaymentAgreementService::new(Arc::new(MemoryRepository::<PaymentAgreement>::new()));
        let first = service.create(agreement()).await.unwrap();
        let second = service.create(agreement()).await.unwrap();

        service.set_active_status(first.id, false).await.unwrap();
        let ids: Vec<_> = service.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![second.id]);

        service.set_active_status(first.id, true).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 2);
    }
}
