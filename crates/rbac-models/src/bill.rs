//! Bill model

use chrono::{DateTime, NaiveDate, Utc};
use rbac_core::traits::{Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillState {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl BillState {
    /// Whether the bill still expects a payment
    pub fn is_open(self) -> bool {
        matches!(self, BillState::Pending | BillState::Overdue)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Id,
    pub barcode: String,
    pub issue_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub total_value: Decimal,
    pub state: BillState,
    pub user_id: Id,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(Bill);
transfer!(BillDto);

impl Entity for Bill {
    const TYPE_NAME: &'static str = "Bill";
}

impl Bill {
    /// Expects a validated DTO (both dates present).
    pub fn from_dto(dto: &BillDto, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            id: 0,
            barcode: dto.barcode.trim().to_string(),
            issue_date: dto.issue_date.unwrap_or(today),
            expiration_date: dto.expiration_date.unwrap_or(today),
            total_value: dto.total_value,
            state: dto.state,
            user_id: dto.user_id,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &BillDto) {
        self.barcode = dto.barcode.trim().to_string();
        if let Some(issue_date) = dto.issue_date {
            self.issue_date = issue_date;
        }
        if let Some(expiration_date) = dto.expiration_date {
            self.expiration_date = expiration_date;
        }
        self.total_value = dto.total_value;
        self.state = dto.state;
        self.user_id = dto.user_id;
    }

    pub fn apply_patch(&mut self, patch: &BillPatch) {
        if let Some(ref barcode) = patch.barcode {
            self.barcode = barcode.trim().to_string();
        }
        if let Some(issue_date) = patch.issue_date {
            self.issue_date = issue_date;
        }
        if let Some(expiration_date) = patch.expiration_date {
            self.expiration_date = expiration_date;
        }
        if let Some(total_value) = patch.total_value {
            self.total_value = total_value;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    #[serde(default)]
    pub id: Id,

    #[validate(length(max = 64))]
    pub barcode: String,

    #[serde(default)]
    pub issue_date: Option<NaiveDate>,

    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,

    pub total_value: Decimal,

    #[serde(default)]
    pub state: BillState,

    pub user_id: Id,

    #[serde(default)]
    pub row_version: i64,
}

impl From<&Bill> for BillDto {
    fn from(bill: &Bill) -> Self {
        Self {
            id: bill.id,
            barcode: bill.barcode.clone(),
            issue_date: Some(bill.issue_date),
            expiration_date: Some(bill.expiration_date),
            total_value: bill.total_value,
            state: bill.state,
            user_id: bill.user_id,
            row_version: bill.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillPatch {
    pub barcode: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub total_value: Option<Decimal>,
    pub state: Option<BillState>,
    pub user_id: Option<Id>,
}

impl BillPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_issue_date(mut self, issue_date: NaiveDate) -> Self {
        self.issue_date = Some(issue_date);
        self
    }

    pub fn with_expiration_date(mut self, expiration_date: NaiveDate) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_total_value(mut self, total_value: Decimal) -> Self {
        self.total_value = Some(total_value);
        self
    }

    pub fn with_state(mut self, state: BillState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_user_id(mut self, user_id: Id) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_states() {
        assert!(BillState::Pending.is_open());
        assert!(BillState::Overdue.is_open());
        assert!(!BillState::Paid.is_open());
        assert!(!BillState::Cancelled.is_open());
    }

    #[test]
    fn test_state_wire_format() {
        let json = serde_json::to_string(&BillState::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
    }
}
