// src/error.rs
use http::StatusCode;
use thiserror::Error;

use crate::form::{Field, FieldKind, ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote call failed ({status}): {message}")]
    Remote { status: StatusCode, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Field {field} expects a {expected} value")]
    FieldType { field: Field, expected: FieldKind },

    #[error("Product {0} was not loaded; reload it before saving")]
    ProductNotLoaded(i64),

    #[error("Form is still initializing")]
    NotReady,

    #[error("A save is already in progress")]
    SubmitInFlight,

    #[error("Form has already navigated away")]
    Closed,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn remote(status: StatusCode, msg: impl Into<String>) -> Self {
        AppError::Remote { status, message: msg.into() }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;
