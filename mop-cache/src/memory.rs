//! In-memory archive backend

use crate::archive::{Archive, ResourceOpener};
use crate::error::{CacheError, CacheResult};
use mop_config::CacheConfig;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Archives held in memory, keyed by name.
///
/// Clones share the same archive set, so a test can keep adding archives
/// after handing the backend to a cache.
#[derive(Debug, Clone)]
pub struct MemoryArchives {
    archives: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    config: CacheConfig,
}

impl MemoryArchives {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            archives: Arc::new(RwLock::new(BTreeMap::new())),
            config,
        }
    }

    /// Pre-populated archive set
    pub fn with_archives<I, S>(archives: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: AsRef<str>,
    {
        let backend = Self::new();
        {
            let mut map = backend.archives.write();
            for (name, bytes) in archives {
                map.insert(name.as_ref().to_string(), bytes);
            }
        }
        backend
    }

    pub fn insert(&self, name: impl Into<String>, bytes: Vec<u8>) {
        self.archives.write().insert(name.into(), bytes);
    }

    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.archives.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.archives.read().contains_key(name)
    }

    /// Archive names in order
    pub fn names(&self) -> Vec<String> {
        self.archives.read().keys().cloned().collect()
    }
}

impl Default for MemoryArchives {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceOpener for MemoryArchives {
    type Resource = Archive;

    fn open(&self, name: &str) -> CacheResult<Archive> {
        let archives = self.archives.read();
        let bytes = archives.get(name).ok_or_else(|| CacheError::NotFound {
            name: name.to_string(),
        })?;
        if bytes.len() > self.config.max_archive_bytes {
            return Err(CacheError::TooLarge {
                name: name.to_string(),
                size: bytes.len(),
                limit: self.config.max_archive_bytes,
            });
        }
        Ok(Archive::new(name, bytes.clone()))
    }
}
