//! Client-side validation errors.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure detected before any request leaves the client.
///
/// The payload of [`DomainError::Validation`] is the exact inline message the
/// form shows to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Text suitable for an inline form message.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::InvalidId(msg) => msg,
        }
    }
}
