//! HTTP error handling and response conversion.
//!
//! Domain failures already arrive inside their response envelope; this module
//! only picks the status code for them. Failures that happen before a request
//! reaches the façade (malformed bodies, bad path ids, session checks) are
//! [`AppError`]s and render in the same `{ error: { field, message } }` shape.

use crate::{
    application::envelope::{Envelope, FieldError},
    domain::shared::errors::ErrorKind,
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Status code for a domain error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::ConstraintViolation => StatusCode::CONFLICT,
        ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a façade envelope, 200 on success.
pub fn envelope_response<E>(envelope: E) -> (StatusCode, Json<E>)
where
    E: Envelope + Serialize,
{
    let status = envelope
        .error()
        .map(|e| status_for(e.kind))
        .unwrap_or(StatusCode::OK);
    (status, Json(envelope))
}

/// Transport-level failures returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request body or path could not be decoded (400).
    BadRequest { field: String, message: String },

    /// Missing or mismatching session (403).
    Forbidden { field: String, message: String },

    /// Unclassified internal error (500).
    Internal(String),
}

impl AppError {
    pub fn forbidden(field: &str, message: &str) -> Self {
        Self::Forbidden {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The wire error, without implementation details for internal failures.
    fn field_error(&self) -> FieldError {
        let (field, message, kind) = match self {
            Self::BadRequest { field, message } => {
                (field.clone(), message.clone(), ErrorKind::ValidationFailed)
            }
            Self::Forbidden { field, message } => {
                (field.clone(), message.clone(), ErrorKind::Unauthorized)
            }
            Self::Internal(_) => (
                "server".to_string(),
                "Internal server error".to_string(),
                ErrorKind::Unknown,
            ),
        };
        FieldError {
            field,
            message,
            kind,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest { field, message } => write!(f, "Bad request: {}: {}", field, message),
            Self::Forbidden { field, message } => write!(f, "Forbidden: {}: {}", field, message),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("error={}", self),
            _ => tracing::warn!("error={}", self),
        }

        (status, Json(json!({ "error": self.field_error() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            field: "body".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            field: "id".to_string(),
            message: rejection.body_text(),
        }
    }
}
