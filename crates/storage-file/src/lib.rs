//! JSON file storage for Tarushiru.
//!
//! Implements the `DocumentStorage` trait from `tarushiru-core` over a single
//! file on disk, and reads/writes backup files.
//!
//! ```text
//! core (document, store)
//!         │
//!         ▼
//! storage-file (this crate)
//!         │
//!         ▼
//!   tarushiru_data.json
//! ```

pub mod errors;
mod file_store;

pub use errors::FileStorageError;
pub use file_store::{read_backup_file, write_backup_file, FileDocumentStorage, DEFAULT_FILE_NAME};
