use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A durable string key-value store. Reads and writes may fail; callers
/// are expected to fall back to in-memory defaults.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ─── FILE STORE ─────────────────────────────────────────────────

/// Flat JSON object on disk, e.g. `{"portfolio-theme": "light"}`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn in_dir(dir: &Path) -> Self {
        Self { path: dir.join(Self::FILE_NAME) }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(e)) => {
                tracing::debug!("Replacing unreadable storage file {}: {e}", self.path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

// ─── MEMORY STORE ───────────────────────────────────────────────

/// Process-local store, used when the config directory can't be created.
/// Values last until exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Pick the on-disk store for `dir`, or an in-memory one when the
/// directory can't be created.
pub fn open_store(dir: &Path) -> Box<dyn KeyValueStore> {
    match fs::create_dir_all(dir) {
        Ok(()) => Box::new(FileStore::in_dir(dir)),
        Err(e) => {
            tracing::warn!("Storage unavailable in {}: {e}; theme will not persist", dir.display());
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Refuses every call, like storage the environment has locked away.
    #[derive(Debug, Default)]
    pub struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::new(ErrorKind::PermissionDenied, "storage denied")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(ErrorKind::PermissionDenied, "storage denied")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-storage-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = temp_dir("missing");
        let store = FileStore::in_dir(&dir);
        assert!(store.get("portfolio-theme").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = temp_dir("setget");
        let mut store = FileStore::in_dir(&dir);
        store.set("portfolio-theme", "light").unwrap();
        store.set("other", "x").unwrap();
        let reopened = FileStore::in_dir(&dir);
        assert_eq!(reopened.get("portfolio-theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FileStore::FILE_NAME), "not json").unwrap();
        let mut store = FileStore::in_dir(&dir);
        assert!(matches!(store.get("k"), Err(StorageError::Corrupt(_))));
        // A write recovers the file.
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_file_is_private() {
        let dir = temp_dir("perms");
        let mut store = FileStore::in_dir(&dir);
        store.set("portfolio-theme", "dark").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let file = fs::metadata(dir.join(FileStore::FILE_NAME)).unwrap();
            assert_eq!(file.permissions().mode() & 0o777, 0o600);
            let folder = fs::metadata(&dir).unwrap();
            assert_eq!(folder.permissions().mode() & 0o777, 0o700);
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_store_falls_back_to_memory() {
        // A regular file where the directory should be.
        let blocker = temp_dir("blocked");
        fs::write(&blocker, "x").unwrap();
        let mut store = open_store(&blocker.join("folio"));
        store.set("portfolio-theme", "light").unwrap();
        assert_eq!(store.get("portfolio-theme").unwrap().as_deref(), Some("light"));
        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn test_open_store_persists_on_disk() {
        let dir = temp_dir("open");
        let mut store = open_store(&dir);
        store.set("portfolio-theme", "light").unwrap();
        assert!(dir.join(FileStore::FILE_NAME).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
