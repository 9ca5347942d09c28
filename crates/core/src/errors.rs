use thiserror::Error;

use crate::domain::product::Barcode;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Outcome of a failed barcode lookup.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no product with barcode `{barcode}`")]
    NotFound { barcode: Barcode },
    #[error("lookup failed: {0}")]
    Internal(String),
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Product not found",
            Self::Internal(_) => "Internal Server Error",
        }
    }

    /// Failure description exposed to clients. Only internal failures carry one.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => None,
            Self::Internal(details) => Some(details),
        }
    }
}
