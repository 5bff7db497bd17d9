//! Cache persisted to a JSON file, shared across processes

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use omunits_core::CacheError;
use tracing::debug;

use crate::{Cache, MemoryCache};

/// Memory cache that loads from and flushes to a JSON object file.
///
/// Writes stay in memory until `flush` is called.
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    inner: MemoryCache,
}

impl FileCache {
    /// Open the cache at `path`; a missing file yields an empty cache
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        let entries: HashMap<String, String> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "opened cache file");
        Ok(Self { path, inner: MemoryCache::from_entries(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every entry to disk, keys sorted
    pub fn flush(&self) -> Result<(), CacheError> {
        let entries: BTreeMap<String, String> = self.inner.snapshot()?.into_iter().collect();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), entries = entries.len(), "flushed cache file");
        Ok(())
    }
}

impl Cache for FileCache {
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.inner.exists(key)
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.inner.set(key, value)
    }
}
