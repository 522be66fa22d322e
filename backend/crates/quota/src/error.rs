//! Quota Error Types
//!
//! This module provides quota-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Note that a denied check is *not* an error: denial travels as a
//! [`crate::window::QuotaDecision`] with `allowed = false`. The variants
//! here cover misconfiguration and integration mistakes only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quota-specific result type alias
pub type QuotaResult<T> = Result<T, QuotaError>;

/// Quota-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    /// Policy rejected at construction time (fail fast: a non-positive
    /// limit or window makes the admission algorithm meaningless)
    #[error("Invalid quota configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    /// Operation name not present in the registry (strict mode only)
    #[error("Unknown quota operation: {0}")]
    UnknownOperation(String),
}

impl QuotaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuotaError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            QuotaError::UnknownOperation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuotaError::InvalidConfig { .. } => ErrorKind::InternalServerError,
            QuotaError::UnknownOperation(_) => ErrorKind::BadRequest,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuotaError::InvalidConfig { reason } => {
                tracing::error!(reason = %reason, "Invalid quota configuration");
            }
            QuotaError::UnknownOperation(name) => {
                tracing::warn!(operation = %name, "Unknown quota operation");
            }
        }
    }
}

impl From<QuotaError> for AppError {
    fn from(err: QuotaError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for QuotaError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
