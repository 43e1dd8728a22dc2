//! Error taxonomy shared by the budgeting and conversion core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    /// Missing or malformed input, rejected before any work is done.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The exchange-rate provider could not be reached or answered with a failure.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// A referenced category or budget does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl FinanceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FinanceError::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        FinanceError::Upstream(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        FinanceError::NotFound(msg.into())
    }
}

pub type Result<T, E = FinanceError> = std::result::Result<T, E>;
