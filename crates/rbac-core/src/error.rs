//! Core error types for the service layer
//!
//! Every service operation fails with exactly one [`ServiceError`] kind.

use std::error::Error as StdError;

use thiserror::Error;

use crate::traits::Id;

/// Name used for the persistence collaborator in `ExternalService` errors
pub const DATABASE_SERVICE: &str = "database";

/// Boxed source error carried by `ExternalService`
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error type for all service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Caller-supplied input failed a precondition. Raised before any store access.
    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    /// A referenced id does not exist in the store.
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: Id },

    /// The store failed, or reported that a write did not happen.
    #[error("External service error: {service} - {message}")]
    ExternalService {
        service: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A configured rule cannot be applied to the entity type.
    #[error("Business rule violated ({code}): {message}")]
    BusinessRuleViolation { code: String, message: String },

    /// The row was changed by another writer since it was read.
    #[error("Conflict: {entity} with id={id} was modified concurrently")]
    Conflict { entity: &'static str, id: Id },
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Id) -> Self {
        ServiceError::NotFound { entity, id }
    }

    /// Store failure without an underlying error (e.g. `update` returned `false`)
    pub fn external(message: impl Into<String>) -> Self {
        ServiceError::ExternalService {
            service: DATABASE_SERVICE.to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Store failure wrapping the error that caused it
    pub fn external_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ServiceError::ExternalService {
            service: DATABASE_SERVICE.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn business_rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::BusinessRuleViolation {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// Domain errors are raised by the service itself and pass through unchanged
    pub fn is_domain(&self) -> bool {
        !matches!(self, ServiceError::ExternalService { .. })
    }
}

/// Ordered collection of field errors produced by a contract
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    /// First recorded error, in insertion order
    pub fn first(&self) -> Option<(&str, &str)> {
        self.errors.first().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(field, message)| format!("{} {}", field, message))
            .collect()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Only the first error is surfaced; contracts record errors in check order.
impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        match errors.errors.into_iter().next() {
            Some((field, message)) => ServiceError::Validation { field, message },
            None => ServiceError::validation("base", "is invalid"),
        }
    }
}

/// HTTP status code mapping for errors
impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation { .. } => 422,
            ServiceError::NotFound { .. } => 404,
            ServiceError::Conflict { .. } => 409,
            ServiceError::BusinessRuleViolation { .. } => 500,
            ServiceError::ExternalService { .. } => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } => "validation_failed",
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::ExternalService { .. } => "external_service_error",
            ServiceError::BusinessRuleViolation { .. } => "business_rule_violated",
            ServiceError::Conflict { .. } => "conflict",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    #[test]
    fn test_validation_field() {
        let err = ServiceError::validation("username", "can't be blank");
        assert_eq!(err.field(), Some("username"));
        assert_eq!(err.status_code(), 422);
        assert!(err.is_domain());
        assert_eq!(err.to_string(), "Validation failed on username: can't be blank");
    }

    #[test]
    fn test_external_keeps_source() {
        let err = ServiceError::external_with_source("fetching roles", ConnectionReset);
        assert!(!err.is_domain());
        assert_eq!(err.error_code(), "external_service_error");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection reset"));
        match err {
            ServiceError::ExternalService { service, .. } => assert_eq!(service, DATABASE_SERVICE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_validation_error_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("role_name", "can't be blank");
        errors.add("description", "is too long");
        assert!(errors.has_error("description"));

        let err: ServiceError = errors.into();
        assert_eq!(err.field(), Some("role_name"));
    }

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Role", 7);
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Not found: Role with id=7");
    }
}
