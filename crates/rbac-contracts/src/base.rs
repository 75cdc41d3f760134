//! Base contract system
//!
//! Shared checks used by every entity contract. Each helper appends to a
//! [`ValidationErrors`] collection instead of returning early, so a contract
//! reports its failures in the order the checks ran.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rbac_core::error::ValidationErrors;
use rbac_core::traits::Id;
use regex::Regex;
use rust_decimal::Decimal;
use validator::Validate;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Digits with optional leading `+`, spaces and dashes
pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,19}$").expect("phone pattern"));

/// National id: letters, digits and dashes
pub static DOCUMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z\-]{5,20}$").expect("document pattern"));

/// Numeric payment barcode
pub static BARCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,64}$").expect("barcode pattern"));

/// Whether a write creates a new row or replaces an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the input
    fn validate(&self, input: &T) -> ValidationResult;
}

/// Validate an id passed on its own (get, delete, status changes)
pub fn check_id(field: &str, id: Id) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    require_id(field, id, &mut errors);
    errors.into_result()
}

pub fn require_text(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

/// Patch fields: absent is fine, present must not be blank
pub fn optional_text(field: &str, value: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(value) = value {
        require_text(field, value, errors);
    }
}

pub fn max_length(field: &str, value: Option<&str>, max: usize, errors: &mut ValidationErrors) {
    if let Some(value) = value {
        if value.chars().count() > max {
            errors.add(field, format!("is too long (maximum is {} characters)", max));
        }
    }
}

pub fn require_id(field: &str, id: Id, errors: &mut ValidationErrors) {
    if id <= 0 {
        errors.add(field, "must be greater than 0");
    }
}

pub fn optional_id(field: &str, id: Option<Id>, errors: &mut ValidationErrors) {
    if let Some(id) = id {
        require_id(field, id, errors);
    }
}

pub fn require_positive(field: &str, amount: Decimal, errors: &mut ValidationErrors) {
    if amount <= Decimal::ZERO {
        errors.add(field, "must be greater than 0");
    }
}

pub fn optional_positive(field: &str, amount: Option<Decimal>, errors: &mut ValidationErrors) {
    if let Some(amount) = amount {
        require_positive(field, amount, errors);
    }
}

pub fn at_most(field: &str, amount: Decimal, max: Decimal, errors: &mut ValidationErrors) {
    if amount > max {
        errors.add(field, format!("must be less than or equal to {}", max));
    }
}

pub fn optional_at_most(
    field: &str,
    amount: Option<Decimal>,
    max: Decimal,
    errors: &mut ValidationErrors,
) {
    if let Some(amount) = amount {
        at_most(field, amount, max, errors);
    }
}

pub fn require_count(field: &str, count: i32, errors: &mut ValidationErrors) {
    if count <= 0 {
        errors.add(field, "must be greater than 0");
    }
}

pub fn optional_count(field: &str, count: Option<i32>, errors: &mut ValidationErrors) {
    if let Some(count) = count {
        require_count(field, count, errors);
    }
}

pub fn require_date(field: &str, date: Option<NaiveDate>, errors: &mut ValidationErrors) {
    if date.is_none() {
        errors.add(field, "can't be blank");
    }
}

/// Non-blank values must match `pattern`; blank ones are left to [`require_text`]
pub fn require_format(
    field: &str,
    value: &str,
    pattern: &Regex,
    errors: &mut ValidationErrors,
) {
    let value = value.trim();
    if !value.is_empty() && !pattern.is_match(value) {
        errors.add(field, "is invalid");
    }
}

/// `end` must not precede `start` when both are known
pub fn date_order(
    field: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    errors: &mut ValidationErrors,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.add(field, format!("must be on or after {}", start));
        }
    }
}

/// Run the `validator` derive rules on a DTO and record each failure.
///
/// Field errors are recorded sorted by field name so the first reported
/// error is stable.
pub fn derived_rules<T: Validate>(input: &T, errors: &mut ValidationErrors) {
    let Err(report) = input.validate() else {
        return;
    };

    let mut fields: Vec<_> = report.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    for (field, failures) in fields {
        for failure in failures {
            errors.add(field, describe(failure));
        }
    }
}

fn describe(failure: &validator::ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }
    match failure.code.as_ref() {
        "length" => match failure.params.get("max") {
            Some(max) => format!("is too long (maximum is {} characters)", max),
            None => "has an invalid length".to_string(),
        },
        "email" => "is not a valid email address".to_string(),
        code => format!("is invalid ({})", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3))]
        code: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_blank_text() {
        let mut errors = ValidationErrors::new();
        require_text("name", "   ", &mut errors);
        optional_text("description", None, &mut errors);
        assert_eq!(errors.first(), Some(("name", "can't be blank")));
        assert!(!errors.has_error("description"));
    }

    #[test]
    fn test_check_id() {
        assert!(check_id("id", 1).is_ok());
        let errors = check_id("id", 0).unwrap_err();
        assert_eq!(errors.first(), Some(("id", "must be greater than 0")));
    }

    #[test]
    fn test_patterns() {
        assert!(PHONE_PATTERN.is_match("+57 300 123 4567"));
        assert!(!PHONE_PATTERN.is_match("call me"));
        assert!(DOCUMENT_PATTERN.is_match("1020304050"));
        assert!(!DOCUMENT_PATTERN.is_match("12"));
        assert!(BARCODE_PATTERN.is_match("7701234567890"));
        assert!(!BARCODE_PATTERN.is_match("77-01"));
    }

    #[test]
    fn test_date_order() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1);
        let end = NaiveDate::from_ymd_opt(2024, 2, 1);
        let mut errors = ValidationErrors::new();
        date_order("agreement_end", start, end, &mut errors);
        assert!(errors.has_error("agreement_end"));

        let mut errors = ValidationErrors::new();
        date_order("agreement_end", start, start, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_derived_rules_sorted_by_field() {
        let sample = Sample {
            code: "ABCD".to_string(),
            email: "nope".to_string(),
        };
        let mut errors = ValidationErrors::new();
        derived_rules(&sample, &mut errors);

        assert_eq!(
            errors.first(),
            Some(("code", "is too long (maximum is 3 characters)"))
        );
        assert!(errors.has_error("email"));
    }
}
