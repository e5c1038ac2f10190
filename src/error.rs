//! Error types
//!
//! Failures surfaced by the formatting and helper functions. Validation
//! never fails this way: rule violations are reported inside a
//! [`ValidationResult`](crate::utils::validation::ValidationResult).
//! Storage and configuration code uses `anyhow` instead.

use thiserror::Error;

/// Errors raised by formatting and helper functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The locale tag is not in the supported locale table
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// The currency code is not in the supported currency table
    #[error("unsupported currency code '{0}'")]
    UnsupportedCurrency(String),

    /// A date string or timestamp could not be interpreted
    #[error("invalid date value '{0}'")]
    InvalidDate(String),

    /// A helper was called with input outside its domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Result alias for formatting and helper functions
pub type Result<T> = std::result::Result<T, Error>;
