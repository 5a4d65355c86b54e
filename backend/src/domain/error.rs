//! Gateway-level error type.
//!
//! Errors are transport agnostic. Both bindings render them through
//! [`crate::domain::ResponseEnvelope`], which only ever exposes the public
//! message. Internal detail stays in logs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::resources::TransformError;
use super::snowflake::SnowflakeError;

/// Message returned for identifiers that fail snowflake validation.
pub const INVALID_SNOWFLAKE_MESSAGE: &str = "Value is not a valid Discord snowflake";
/// Message returned for unknown routes.
pub const NOT_FOUND_MESSAGE: &str = "404 - Not Found";
/// Message returned for every upstream or transformation failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The identifier is not a valid snowflake.
    InvalidRequest,
    /// No route matches the request.
    NotFound,
    /// Upstream or transformation failure.
    InternalError,
}

impl ErrorCode {
    /// HTTP status carried by this category.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

/// Failure surfaced by [`crate::domain::GatewayService`].
///
/// # Examples
/// ```
/// use lookup_gateway::domain::{ErrorCode, GatewayError};
///
/// let err = GatewayError::internal("upstream closed the connection");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.public_message(), "Internal Server Error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    code: ErrorCode,
    message: String,
}

impl GatewayError {
    /// Create an error with an explicit category.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Identifier failed snowflake validation.
    #[must_use]
    pub fn invalid_snowflake() -> Self {
        Self::new(ErrorCode::InvalidRequest, INVALID_SNOWFLAKE_MESSAGE)
    }

    /// No route matched.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, NOT_FOUND_MESSAGE)
    }

    /// Internal failure; `detail` is kept for logs only.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }

    /// Stable error category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status for the category.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.code.status()
    }

    /// Full message, including internal detail.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Message safe to return to callers.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self.code {
            ErrorCode::InternalError => INTERNAL_ERROR_MESSAGE,
            ErrorCode::InvalidRequest | ErrorCode::NotFound => self.message.as_str(),
        }
    }

    /// JSON body sent to callers: `{ "message": ... }`.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({ "message": self.public_message() })
    }
}

impl From<SnowflakeError> for GatewayError {
    fn from(error: SnowflakeError) -> Self {
        match error {
            SnowflakeError::Invalid { .. } => Self::invalid_snowflake(),
            SnowflakeError::TimestampOutOfRange { .. } => Self::internal(error.to_string()),
        }
    }
}

impl From<TransformError> for GatewayError {
    fn from(error: TransformError) -> Self {
        Self::internal(error.to_string())
    }
}
