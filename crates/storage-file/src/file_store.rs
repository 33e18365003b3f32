use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use log::{debug, info};
use tarushiru_core::store::{backup_file_name, DocumentStorage};
use tarushiru_core::Result;

use crate::errors::FileStorageError;

/// File name used when only a data directory is configured.
pub const DEFAULT_FILE_NAME: &str = "tarushiru_data.json";

/// Keeps the document as a single JSON file.
///
/// A missing or empty file reads as "nothing stored".
#[derive(Debug)]
pub struct FileDocumentStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDocumentStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage at `<dir>/tarushiru_data.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> std::result::Result<MutexGuard<'_, ()>, FileStorageError> {
        self.lock.lock().map_err(|_| FileStorageError::LockPoisoned)
    }
}

impl DocumentStorage for FileDocumentStorage {
    fn read(&self) -> Result<Option<String>> {
        let _guard = self.guard()?;
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(FileStorageError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };
        if raw.is_empty() {
            return Ok(None);
        }
        let text = String::from_utf8(raw).map_err(|_| FileStorageError::Encoding {
            path: self.path.clone(),
        })?;
        Ok(Some(text))
    }

    fn write(&self, contents: &str) -> Result<()> {
        let _guard = self.guard()?;
        write_file(&self.path, contents)?;
        debug!("Wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.guard()?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileStorageError::Remove {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}

/// Writes a backup as `<dir>/tarushiru_backup_YYYY-MM-DD.json` and returns its path.
pub fn write_backup_file(dir: &Path, date: NaiveDate, contents: &str) -> Result<PathBuf> {
    let path = dir.join(backup_file_name(date));
    write_file(&path, contents)?;
    info!("Backup written to {}", path.display());
    Ok(path)
}

/// Reads a backup file chosen by the user.
pub fn read_backup_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        FileStorageError::Read {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Replaces `path` atomically: the contents go to a sibling temp file that
/// is renamed over the target, so the target holds either the old or the
/// new document and never a partial one.
fn write_file(path: &Path, contents: &str) -> std::result::Result<(), FileStorageError> {
    let write_err = |source| FileStorageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = temp_path(path);
    let written = write_synced(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    Ok(())
}

fn write_synced(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tarushiru_core::document::{LoadSource, Mutation};
    use tarushiru_core::profile::UserProfile;
    use tarushiru_core::store::AppStore;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::in_dir(dir.path());
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_empty_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "").unwrap();
        assert_eq!(FileDocumentStorage::new(&path).read().unwrap(), None);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::new(dir.path().join("nested/deeper/data.json"));
        storage.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_write_replaces_whole_file_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::in_dir(dir.path());
        storage.write("{\"journal\":[1,2,3,4,5,6,7,8,9]}").unwrap();
        storage.write("{}").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        assert!(!temp_path(storage.path()).exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_document() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::in_dir(dir.path());
        storage.write("{\"user\":{\"name\":\"kana\"}}").unwrap();

        // A directory in the temp file's place makes the staging write fail.
        fs::create_dir(temp_path(storage.path())).unwrap();

        assert!(storage.write("{\"user\":null}").is_err());
        assert_eq!(
            storage.read().unwrap().as_deref(),
            Some("{\"user\":{\"name\":\"kana\"}}")
        );
    }

    #[test]
    fn test_clear_removes_file_and_is_repeatable() {
        let dir = tempdir().unwrap();
        let storage = FileDocumentStorage::in_dir(dir.path());
        storage.write("{}").unwrap();

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        storage.clear().unwrap();
    }

    #[test]
    fn test_store_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileDocumentStorage::in_dir(dir.path()));

        let mut store = AppStore::load(storage.clone());
        assert_eq!(store.load_source(), LoadSource::Empty);
        store
            .apply(Mutation::SetUser(Some(UserProfile::from_login(
                "kana@example.com",
                "",
            ))))
            .unwrap();

        let reloaded = AppStore::load(storage);
        assert_eq!(reloaded.load_source(), LoadSource::Stored);
        assert_eq!(reloaded.get(), store.get());
    }

    #[test]
    fn test_corrupt_file_survives_load() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileDocumentStorage::in_dir(dir.path()));
        storage.write("{oops").unwrap();

        let store = AppStore::load(storage.clone());
        assert_eq!(store.load_source(), LoadSource::Corrupt);
        assert_eq!(storage.read().unwrap().as_deref(), Some("{oops"));
    }

    #[test]
    fn test_backup_file_round_trip() {
        let dir = tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let path = write_backup_file(dir.path(), date, "{\"user\":{}}").unwrap();

        assert!(path.ends_with("tarushiru_backup_2024-06-01.json"));
        assert_eq!(read_backup_file(&path).unwrap(), "{\"user\":{}}");
    }

    #[test]
    fn test_read_missing_backup_fails() {
        let dir = tempdir().unwrap();
        assert!(read_backup_file(&dir.path().join("nope.json")).is_err());
    }
}
