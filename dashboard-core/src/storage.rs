use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::{collections::HashMap, fmt::Debug, fs, path::PathBuf};

/// Durable key-value storage consumed by [`crate::FavoritesStore`].
///
/// Injected as a capability at construction time rather than reached
/// for as a module-level singleton, so tests can substitute a double.
pub trait PersistentStore: Send + Sync + Debug {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`. A reader must observe
    /// either the previous value or the new one, never a partial write.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistentStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;

        Ok(Some(contents))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create store directory: {}", self.dir.display())
        })?;

        // Write-then-rename keeps the visible file whole at all times.
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write store file: {}", tmp.display()))?;

        fs::rename(&tmp, &path).with_context(|| {
            format!("Failed to replace store file: {}", path.display())
        })?;

        Ok(())
    }
}

/// HashMap-backed store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to simulate existing or corrupted data.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.lock().insert(key.to_string(), value.to_string());
        store
    }
}

impl PersistentStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
