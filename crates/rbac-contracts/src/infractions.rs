//! Contracts for infraction records and their pricing tables

use rbac_core::error::ValidationErrors;
use rust_decimal::Decimal;
use rbac_models::{
    InformationInfractionDto, InformationInfractionPatch, StateInfractionDto,
    StateInfractionPatch, TypeInfractionDto, TypeInfractionPatch,
};

use crate::base::*;

/// Years accepted for fine parameters
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2200;

/// Ceiling for wage and unit prices in fine parameters
pub const MAX_FINE_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

pub struct StateInfractionContract;

impl Contract<StateInfractionDto> for StateInfractionContract {
    fn validate(&self, dto: &StateInfractionDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_id("type_infraction_id", dto.type_infraction_id, &mut errors);
        require_id("person_id", dto.person_id, &mut errors);
        require_text("document_number", &dto.document_number, &mut errors);
        require_format("document_number", &dto.document_number, &DOCUMENT_PATTERN, &mut errors);
        require_positive("fine_value", dto.fine_value, &mut errors);
        require_date("date_violation", dto.date_violation, &mut errors);
        derived_rules(dto, &mut errors);

        errors.into_result()
    }
}

impl Contract<StateInfractionPatch> for StateInfractionContract {
    fn validate(&self, patch: &StateInfractionPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        optional_id("type_infraction_id", patch.type_infraction_id, &mut errors);
        optional_id("person_id", patch.person_id, &mut errors);
        if let Some(document_number) = patch.document_number.as_deref() {
            require_text("document_number", document_number, &mut errors);
            require_format("document_number", document_number, &DOCUMENT_PATTERN, &mut errors);
        }
        optional_positive("fine_value", patch.fine_value, &mut errors);

        errors.into_result()
    }
}

pub struct TypeInfractionContract;

impl Contract<TypeInfractionDto> for TypeInfractionContract {
    fn validate(&self, dto: &TypeInfractionDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_text("type_violation", &dto.type_violation, &mut errors);
        require_count("smldv_count", dto.smldv_count, &mut errors);
        derived_rules(dto, &mut errors);
        errors.into_result()
    }
}

impl Contract<TypeInfractionPatch> for TypeInfractionContract {
    fn validate(&self, patch: &TypeInfractionPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        optional_text("type_violation", patch.type_violation.as_deref(), &mut errors);
        max_length("type_violation", patch.type_violation.as_deref(), 150, &mut errors);
        max_length("description", patch.description.as_deref(), 1000, &mut errors);
        optional_count("smldv_count", patch.smldv_count, &mut errors);
        errors.into_result()
    }
}

pub struct InformationInfractionContract;

fn check_year(year: i32, errors: &mut ValidationErrors) {
    if !YEAR_RANGE.contains(&year) {
        errors.add(
            "year",
            format!("must be between {} and {}", YEAR_RANGE.start(), YEAR_RANGE.end()),
        );
    }
}

impl Contract<InformationInfractionDto> for InformationInfractionContract {
    fn validate(&self, dto: &InformationInfractionDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        check_year(dto.year, &mut errors);
        require_positive("minimum_daily_wage", dto.minimum_daily_wage, &mut errors);
        at_most("minimum_daily_wage", dto.minimum_daily_wage, MAX_FINE_PRICE, &mut errors);
        require_positive("smldv_value", dto.smldv_value, &mut errors);
        at_most("smldv_value", dto.smldv_value, MAX_FINE_PRICE, &mut errors);
        errors.into_result()
    }
}

impl Contract<InformationInfractionPatch> for InformationInfractionContract {
    fn validate(&self, patch: &InformationInfractionPatch) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        if let Some(year) = patch.year {
            check_year(year, &mut errors);
        }
        optional_positive("minimum_daily_wage", patch.minimum_daily_wage, &mut errors);
        optional_at_most("minimum_daily_wage", patch.minimum_daily_wage, MAX_FINE_PRICE, &mut errors);
        optional_positive("smldv_value", patch.smldv_value, &mut errors);
        optional_at_most("smldv_value", patch.smldv_value, MAX_FINE_PRICE, &mut errors);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn valid_infraction() -> StateInfractionDto {
        StateInfractionDto {
            type_infraction_id: 2,
            person_id: 1,
            document_number: "1020304050".to_string(),
            fine_value: Decimal::new(64999995, 2),
            state: true,
            date_violation: NaiveDate::from_ymd_opt(2024, 5, 17),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_infraction() {
        assert!(StateInfractionContract.validate(&valid_infraction()).is_ok());
    }

    #[test]
    fn test_infraction_requires_date() {
        let dto = StateInfractionDto {
            date_violation: None,
            ..valid_infraction()
        };
        let errors = StateInfractionContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first(), Some(("date_violation", "can't be blank")));
    }

    #[test]
    fn test_infraction_fine_positive() {
        let dto = StateInfractionDto {
            fine_value: Decimal::ZERO,
            ..valid_infraction()
        };
        let errors = StateInfractionContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("fine_value"));
    }

    #[test]
    fn test_type_infraction_count() {
        let dto = TypeInfractionDto {
            type_violation: "C02".to_string(),
            smldv_count: 0,
            ..Default::default()
        };
        let errors = TypeInfractionContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("smldv_count"));
    }

    #[test]
    fn test_information_year_range() {
        let dto = InformationInfractionDto {
            year: 1200,
            minimum_daily_wage: Decimal::new(4333333, 2),
            smldv_value: Decimal::new(4333333, 2),
            ..Default::default()
        };
        let errors = InformationInfractionContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("year"));

        let patch = InformationInfractionPatch::new().with_year(2025);
        assert!(InformationInfractionContract.validate(&patch).is_ok());
    }

    #[test]
    fn test_information_prices_capped() {
        let dto = InformationInfractionDto {
            year: 2024,
            minimum_daily_wage: Decimal::new(4333333, 2),
            smldv_value: Decimal::MAX,
            ..Default::default()
        };
        let errors = InformationInfractionContract.validate(&dto).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("smldv_value"));

        let patch =
            InformationInfractionPatch::new().with_minimum_daily_wage(MAX_FINE_PRICE + Decimal::ONE);
        let errors = InformationInfractionContract.validate(&patch).unwrap_err();
        assert_eq!(errors.first().map(|(f, _)| f), Some("minimum_daily_wage"));

        let at_cap = InformationInfractionDto {
            smldv_value: MAX_FINE_PRICE,
            ..dto
        };
        assert!(InformationInfractionContract.validate(&at_cap).is_ok());
    }
}
