//! Storage seam for the persisted document.

use std::sync::Mutex;

use crate::errors::{Error, Result};

/// Reads and writes the serialized document as a single text blob.
///
/// Implementations only move text around; parsing and normalization happen
/// in [`super::AppStore`].
pub trait DocumentStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    fn write(&self, contents: &str) -> Result<()>;

    /// Removes the stored document. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Storage kept in memory, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStorage {
    contents: Mutex<Option<String>>,
}

impl InMemoryDocumentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.contents
            .lock()
            .map_err(|_| Error::Unexpected("In-memory storage lock poisoned".to_string()))
    }
}

impl DocumentStorage for InMemoryDocumentStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.lock()? = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
