//! Yearly fine parameters
//!
//! One row per year with the legal minimum daily wage and the monetary value
//! of one SMLDV unit used to price infractions.

use chrono::{DateTime, Utc};
use rbac_core::traits::{ActiveFlag, Entity, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InformationInfraction {
    pub id: Id,
    pub year: i32,
    pub minimum_daily_wage: Decimal,
    pub smldv_value: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub row_version: i64,
}

persisted!(InformationInfraction);
transfer!(InformationInfractionDto);

impl Entity for InformationInfraction {
    const TYPE_NAME: &'static str = "InformationInfraction";
    const HAS_ACTIVE_FLAG: bool = true;

    fn active_flag(&self) -> Option<bool> {
        Some(self.is_active)
    }
}

impl ActiveFlag for InformationInfraction {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl InformationInfraction {
    /// Fine for a violation priced at `smldv_count` units, `None` on overflow
    pub fn fine_for(&self, smldv_count: i32) -> Option<Decimal> {
        self.smldv_value.checked_mul(Decimal::from(smldv_count))
    }

    pub fn from_dto(dto: &InformationInfractionDto, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            year: dto.year,
            minimum_daily_wage: dto.minimum_daily_wage,
            smldv_value: dto.smldv_value,
            is_active: dto.is_active,
            created_at: now,
            row_version: 0,
        }
    }

    pub fn apply_dto(&mut self, dto: &InformationInfractionDto) {
        self.year = dto.year;
        self.minimum_daily_wage = dto.minimum_daily_wage;
        self.smldv_value = dto.smldv_value;
        self.is_active = dto.is_active;
    }

    pub fn apply_patch(&mut self, patch: &InformationInfractionPatch) {
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(minimum_daily_wage) = patch.minimum_daily_wage {
            self.minimum_daily_wage = minimum_daily_wage;
        }
        if let Some(smldv_value) = patch.smldv_value {
            self.smldv_value = smldv_value;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InformationInfractionDto {
    #[serde(default)]
    pub id: Id,
    pub year: i32,
    pub minimum_daily_wage: Decimal,
    pub smldv_value: Decimal,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub row_version: i64,
}

impl From<&InformationInfraction> for InformationInfractionDto {
    fn from(info: &InformationInfraction) -> Self {
        Self {
            id: info.id,
            year: info.year,
            minimum_daily_wage: info.minimum_daily_wage,
            smldv_value: info.smldv_value,
            is_active: info.is_active,
            row_version: info.row_version,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InformationInfractionPatch {
    pub year: Option<i32>,
    pub minimum_daily_wage: Option<Decimal>,
    pub smldv_value: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl InformationInfractionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_minimum_daily_wage(mut self, minimum_daily_wage: Decimal) -> Self {
        self.minimum_daily_wage = Some(minimum_daily_wage);
        self
    }

    pub fn with_smldv_value(mut self, smldv_value: Decimal) -> Self {
        self.smldv_value = Some(smldv_value);
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
    use std::str::FromStr;

    #[test]
    fn test_fine_for() {
        let info = InformationInfraction::from_dto(
            &InformationInfractionDto {
                year: 2024,
                minimum_daily_wage: Decimal::from_str("43333.33").unwrap(),
                smldv_value: Decimal::from_str("43333.33").unwrap(),
                is_active: true,
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(info.fine_for(15), Some(Decimal::from_str("649999.95").unwrap()));
        assert_eq!(info.fine_for(0), Some(Decimal::ZERO));
    }

    #[test]
    fn test_fine_for_overflow() {
        let mut info = InformationInfraction::from_dto(
            &InformationInfractionDto {
                year: 2024,
                is_active: true,
                ..Default::default()
            },
            Utc::now(),
        );
        info.smldv_value = Decimal::MAX;
        assert_eq!(info.fine_for(2), None);
        assert_eq!(info.fine_for(1), Some(Decimal::MAX));
    }
}
