//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Addon not found.
    #[error("Addon not found: {0}")]
    AddonNotFound(String),

    /// Country not found.
    #[error("Country not found: {0}")]
    CountryNotFound(String),

    /// City not found.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Package not found or inactive.
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Custom order not found.
    #[error("Custom order not found: {0}")]
    CustomOrderNotFound(String),

    /// Business-rule validation failure.
    #[error("{0}")]
    Validation(String),

    /// Illegal status transition on a custom order.
    #[error("Cannot transition from '{from}' to '{to}'. Allowed transitions: {allowed}")]
    InvalidStatusTransition {
        from: String,
        to: String,
        allowed: String,
    },

    /// Caller is not permitted to perform the operation.
    #[error("{0}")]
    Unauthorized(String),

    /// Optimistic-concurrency loss: the aggregate changed under the writer.
    #[error("Concurrent modification of {entity} {id}: expected version {expected}, found {found}")]
    VersionConflict {
        entity: &'static str,
        id: String,
        expected: u64,
        found: u64,
    },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage or lookup I/O failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse error classes matching HTTP status families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400-class: recoverable input/business-rule failure.
    Validation,
    /// 404-class: a referenced record does not resolve.
    NotFound,
    /// 409-class: retryable optimistic-concurrency loss.
    Conflict,
    /// 500-class: infrastructure fault, surfaced opaquely to end users.
    Fatal,
}

impl ErrorKind {
    /// The HTTP status code conventionally used for this class.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Fatal => 500,
        }
    }
}

impl CommerceError {
    /// Classify this error for the transport layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommerceError::ProductNotFound(_)
            | CommerceError::AddonNotFound(_)
            | CommerceError::CountryNotFound(_)
            | CommerceError::CityNotFound(_)
            | CommerceError::PackageNotFound(_)
            | CommerceError::OrderNotFound(_)
            | CommerceError::CustomOrderNotFound(_) => ErrorKind::NotFound,

            CommerceError::Validation(_)
            | CommerceError::InvalidStatusTransition { .. }
            | CommerceError::Unauthorized(_) => ErrorKind::Validation,

            CommerceError::VersionConflict { .. } => ErrorKind::Conflict,

            CommerceError::CurrencyMismatch { .. }
            | CommerceError::Overflow
            | CommerceError::Storage(_) => ErrorKind::Fatal,
        }
    }

    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CommerceError::CityNotFound("c1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CommerceError::Validation("bad".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CommerceError::VersionConflict {
                entity: "order",
                id: "o1".into(),
                expected: 1,
                found: 2,
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(CommerceError::Overflow.kind(), ErrorKind::Fatal);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Validation.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::Fatal.status_code(), 500);
    }

    #[test]
    fn test_conflict_is_retryable() {
        let err = CommerceError::VersionConflict {
            entity: "order",
            id: "o1".into(),
            expected: 3,
            found: 4,
        };
        assert!(err.is_retryable());
        assert!(!CommerceError::Overflow.is_retryable());
    }
}
