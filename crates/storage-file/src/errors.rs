//! File-specific error types.
//!
//! These wrap `std::io` failures and are converted to the medium-agnostic
//! `tarushiru_core::errors::StorageError` before leaving this crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tarushiru_core::errors::{Error, StorageError};

#[derive(Error, Debug)]
pub enum FileStorageError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl From<FileStorageError> for Error {
    fn from(err: FileStorageError) -> Self {
        let message = err.to_string();
        match err {
            FileStorageError::Read { .. } | FileStorageError::Encoding { .. } => {
                Error::Storage(StorageError::ReadFailed(message))
            }
            FileStorageError::Write { .. } => Error::Storage(StorageError::WriteFailed(message)),
            FileStorageError::Remove { .. } => Error::Storage(StorageError::ClearFailed(message)),
            FileStorageError::LockPoisoned => Error::Unexpected(message),
        }
    }
}
