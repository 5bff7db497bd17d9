//! Process-local cache

use std::collections::HashMap;
use std::sync::RwLock;

use omunits_core::CacheError;

use crate::Cache;

fn poisoned() -> CacheError {
    CacheError::Backend("cache lock poisoned".to_string())
}

/// Cache backed by a lock-guarded map
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self { entries: RwLock::new(entries) }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every entry
    pub fn snapshot(&self) -> Result<HashMap<String, String>, CacheError> {
        self.entries.read().map(|e| e.clone()).map_err(|_| poisoned())
    }
}

impl Cache for MemoryCache {
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.contains_key(key))
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
