//! omunits Cache - Advisory key-value store
//!
//! The cache only ever saves work: every value it holds can be recomputed
//! from the knowledge base. Writers racing on the same key all compute the
//! same value, so last-write-wins is fine.

mod memory;
mod file;

pub use memory::MemoryCache;
pub use file::FileCache;

use omunits_core::CacheError;

/// Shared string key-value store
pub trait Cache: Send + Sync {
    fn exists(&self, key: &str) -> Result<bool, CacheError>;
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Key layout
pub mod keys {
    /// Spelling dictionary (JSON array of words)
    pub const DICTIONARY: &str = "dictionary";

    pub fn factor_si(unit: &str) -> String {
        format!("factor_si:{}", unit)
    }

    pub fn dimension(dimension: &str) -> String {
        format!("dimension:{}", dimension)
    }

    pub fn prefix(prefix: &str) -> String {
        format!("prefix:{}", prefix)
    }

    pub fn scale(unit: &str) -> String {
        format!("scale:{}", unit)
    }
}
