//! Result type aliases

use crate::error::ServiceError;

/// Standard Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
