//! Lookup errors shared by the locator, pagination, passage and search modules.

use serde::Serialize;
use thiserror::Error;

/// Machine-readable error kind. The HTTP layer maps these to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Malformed or out-of-range input supplied by the caller
    #[error("{0}")]
    Validation(String),
    /// Well-formed identifier that does not resolve to any record
    #[error("{0}")]
    NotFound(String),
}

impl LookupError {
    pub fn validation(message: impl Into<String>) -> Self {
        LookupError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LookupError::NotFound(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Validation(_) => ErrorKind::Validation,
            LookupError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
