//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::confirmation::ConfirmationError;
use crate::domain::{AmountError, DomainError};
use crate::wallet::WalletError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("No action bound to element: {0}")]
    UnknownElement(String),

    // Signing agent errors
    #[error("Submission rejected: {0}")]
    SubmissionRejected(WalletError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Confirmation(#[from] ConfirmationError),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownElement(_) => StatusCode::NOT_FOUND,
            AppError::SubmissionRejected(e) | AppError::Wallet(e) if e.is_user_rejection() => {
                StatusCode::CONFLICT
            }
            AppError::SubmissionRejected(_) | AppError::Wallet(_) => StatusCode::BAD_GATEWAY,
            AppError::Confirmation(ConfirmationError::TimedOut { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Confirmation(ConfirmationError::Closed(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Domain(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Domain(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidAmount(_) => "invalid_amount",
            AppError::UnknownElement(_) => "unknown_element",
            AppError::SubmissionRejected(e) | AppError::Wallet(e) if e.is_user_rejection() => {
                "user_rejected"
            }
            AppError::SubmissionRejected(_) => "submission_rejected",
            AppError::Wallet(_) => "wallet_error",
            AppError::Confirmation(ConfirmationError::TimedOut { .. }) => "confirmation_timed_out",
            AppError::Confirmation(ConfirmationError::Closed(_)) => "confirmation_closed",
            AppError::Domain(_) => "domain_error",
            AppError::Config(_) => "config_error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let details = match &self {
            AppError::SubmissionRejected(e) | AppError::Wallet(e) => Some(e.to_string()),
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                None
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
