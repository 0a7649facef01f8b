use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Failure raised by an Entity Store implementation.
///
/// Store implementations translate their native failures into these variants
/// from structured metadata (error codes, constraint names), never from the
/// text of a driver message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Unique constraint violated on {field}")]
    UniqueViolation { field: String },
    #[error("Referenced record missing for {field}")]
    MissingReference { field: String },
    #[error("Store failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    ValidationFailed,
    ConstraintViolation,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field}: {message}")]
    NotFound { field: String, message: String },
    #[error("{field}: {message}")]
    Unauthorized { field: String, message: String },
    #[error("{field}: {message}")]
    ValidationFailed { field: String, message: String },
    #[error("{field}: {message}")]
    ConstraintViolation { field: String, message: String },
    #[error("{field}: {message}")]
    Unknown { field: String, message: String },
}

impl DomainError {
    pub fn not_found(field: &str, message: &str) -> Self {
        Self::NotFound {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unauthorized(field: &str, message: &str) -> Self {
        Self::Unauthorized {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn constraint(field: &str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::NotFound { field, .. }
            | Self::Unauthorized { field, .. }
            | Self::ValidationFailed { field, .. }
            | Self::ConstraintViolation { field, .. }
            | Self::Unknown { field, .. } => field,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::ValidationFailed { message, .. }
            | Self::ConstraintViolation { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => DomainError::not_found("id", "Record not found"),
            StoreError::UniqueViolation { field } => {
                let message = format!("{} is already taken", field);
                DomainError::ConstraintViolation { field, message }
            }
            StoreError::MissingReference { field } => {
                let message = format!("{} does not reference an existing record", field);
                DomainError::ConstraintViolation { field, message }
            }
            StoreError::Backend(message) => DomainError::Unknown {
                field: "store".to_string(),
                message,
            },
        }
    }
}
