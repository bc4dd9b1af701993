//! Error taxonomy shared by the storage tiers, the resolver and the HTTP layer.
//!
//! - [`StorageError`] is raised by persistence adapters and the storage facade.
//! - [`AppError`] is what services return; it renders as a JSON error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors raised below the resolver by the persistent store or the facade.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No row exists for the requested key, or it is logically expired on a resolve.
    #[error("record not found")]
    NotFound,

    /// Transport or backend failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a record.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// JSON error envelope.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error returned by services and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request input (bad URL, expiry in the past).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A custom alias violates the length or character rules.
    #[error("{message}")]
    InvalidAlias { message: String, details: Value },

    /// The alias is bound to another URL, or the automatic code space is exhausted.
    #[error("{message}")]
    NotAvailable { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Backend failure, surfaced as-is.
    #[error("{message}")]
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_alias(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidAlias {
            message: message.into(),
            details,
        }
    }

    pub fn not_available(message: impl Into<String>, details: Value) -> Self {
        Self::NotAvailable {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidAlias { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NotAvailable { .. } => StatusCode::CONFLICT,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::InvalidAlias { message, details } => ("invalid_alias", message, details),
            AppError::NotAvailable { message, details } => ("not_available", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Storage { message, details } => ("storage_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => AppError::not_found("Short URL not found", json!({})),
            other => AppError::storage(other.to_string(), json!({ "source": "storage" })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}
