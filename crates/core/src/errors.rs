//! Core error types for the Tarushiru application.
//!
//! This module defines storage-agnostic error types. Medium-specific errors
//! (file I/O, browser storage, ...) are converted to these types by the
//! storage layer.

use std::num::ParseIntError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the journal application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by a `DocumentStorage` implementation.
///
/// Details are kept as strings so that every storage medium can map its own
/// failures into this shape.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The persisted document could not be read.
    #[error("Failed to read document: {0}")]
    ReadFailed(String),

    /// The document could not be written.
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// The persisted document could not be removed.
    #[error("Failed to clear document: {0}")]
    ClearFailed(String),

    /// A backup file was rejected before it touched storage.
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),
}

/// Validation errors for user input parsed at the boundary.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseIntError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

/// Soft authentication failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("No profile exists yet, log in first")]
    NoProfile,

    #[error("Not logged in")]
    NotLoggedIn,
}

// === From implementations for common error types ===

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Validation(ValidationError::NumberParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
