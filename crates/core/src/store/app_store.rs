//! Write-through store around the in-memory document.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde_json::Value;

use super::store_traits::DocumentStorage;
use crate::constants::BACKUP_FILE_PREFIX;
use crate::document::{
    apply_mutation, normalize_document, AppData, LoadOutcome, LoadSource, Mutation,
};
use crate::errors::{Result, StorageError};

/// Holds the current document and persists every change before exposing it.
pub struct AppStore {
    storage: Arc<dyn DocumentStorage>,
    data: AppData,
    source: LoadSource,
}

impl AppStore {
    /// Loads and normalizes whatever the storage holds.
    ///
    /// Never fails and never writes: unreadable or corrupt content leaves
    /// the stored copy alone until the next mutation.
    pub fn load(storage: Arc<dyn DocumentStorage>) -> Self {
        let LoadOutcome { data, source } = read_outcome(storage.as_ref());
        debug!("Loaded document ({:?})", source);
        Self {
            storage,
            data,
            source,
        }
    }

    pub fn get(&self) -> &AppData {
        &self.data
    }

    /// How the current document was obtained at the last load.
    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// Applies a mutation and persists the resulting document.
    ///
    /// On any failure the in-memory document is left as it was.
    pub fn apply(&mut self, mutation: Mutation) -> Result<&AppData> {
        let name = mutation.name();
        let next = apply_mutation(&self.data, mutation)?;
        self.persist(&next)?;
        self.data = next;
        debug!("Persisted document after {}", name);
        Ok(&self.data)
    }

    /// Clears storage and returns to the default document.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.data = AppData::default();
        self.source = LoadSource::Empty;
        info!("Document reset to defaults");
        Ok(())
    }

    /// The persisted text, or `None` when nothing has been stored yet.
    pub fn export_backup(&self) -> Result<Option<String>> {
        self.storage.read()
    }

    /// Overwrites storage with a backup and reloads from it.
    ///
    /// The backup must be a JSON object with a non-null `user`; anything else
    /// is rejected before storage is touched.
    pub fn import_backup(&mut self, contents: &str) -> Result<&AppData> {
        let parsed: Value = serde_json::from_str(contents)
            .map_err(|e| StorageError::InvalidBackup(format!("not valid JSON: {}", e)))?;
        if !parsed.get("user").is_some_and(Value::is_object) {
            return Err(StorageError::InvalidBackup("missing user profile".to_string()).into());
        }

        self.storage.write(contents)?;
        self.reload();
        info!("Imported backup ({} journal entries)", self.data.journal.len());
        Ok(&self.data)
    }

    /// Re-reads storage into memory.
    pub fn reload(&mut self) {
        let LoadOutcome { data, source } = read_outcome(self.storage.as_ref());
        self.data = data;
        self.source = source;
    }

    fn persist(&self, data: &AppData) -> Result<()> {
        let contents = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.storage.write(&contents)
    }
}

fn read_outcome(storage: &dyn DocumentStorage) -> LoadOutcome {
    match storage.read() {
        Ok(raw) => normalize_document(raw.as_deref()),
        Err(e) => {
            warn!("Failed to read stored document, using defaults: {}", e);
            LoadOutcome {
                data: AppData::default(),
                source: LoadSource::Corrupt,
            }
        }
    }
}

/// `tarushiru_backup_YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}{}.json", BACKUP_FILE_PREFIX, date.format("%Y-%m-%d"))
}
