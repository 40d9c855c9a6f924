//! Error types for coffee service operations.

use std::error::Error;
use std::fmt;

use crate::coffee::CoffeeId;
use crate::store::StoreError;

/// Error type for coffee service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No coffee with this id.
    NotFound(CoffeeId),
    /// The supplied `If-Match` version does not equal the stored version.
    /// `expected` is the client's value as sent, which may be negative.
    Conflict {
        id: CoffeeId,
        expected: i64,
        actual: u64,
    },
    /// Request is malformed (e.g. missing or unparsable `If-Match`).
    BadRequest(String),
    /// Store failure (poisoned lock, backend error).
    Store(StoreError),
    /// Response could not be built (e.g. invalid header value).
    Response(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(id) => write!(f, "coffee not found: {}", id),
            ServiceError::Conflict {
                id,
                expected,
                actual,
            } => write!(
                f,
                "version conflict on coffee {} (if-match {}, current {})",
                id, expected, actual
            ),
            ServiceError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ServiceError::Store(e) => write!(f, "store error: {}", e),
            ServiceError::Response(msg) => write!(f, "response error: {}", msg),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ServiceError::NotFound(id),
            StoreError::ConcurrencyConflict {
                id,
                expected,
                actual,
            } => ServiceError::Conflict {
                id,
                expected: i64::try_from(expected).unwrap_or(i64::MAX),
                actual,
            },
            other => ServiceError::Store(other),
        }
    }
}

impl ServiceError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict { .. } => 409,
            ServiceError::BadRequest(_) => 400,
            ServiceError::Store(_) => 500,
            ServiceError::Response(_) => 500,
        }
    }
}
