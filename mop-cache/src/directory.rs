//! Directory archive backend: `<root>/<name>` on the native file system

use crate::archive::{validate_name, Archive, ResourceOpener};
use crate::error::{CacheError, CacheResult};
use mop_config::CacheConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirectoryArchives {
    root: PathBuf,
    config: CacheConfig,
}

impl DirectoryArchives {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, CacheConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: CacheConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of an archive name
    pub fn path_of(&self, name: &str) -> CacheResult<PathBuf> {
        validate_name(name)?;
        Ok(name.split('/').fold(self.root.clone(), |path, part| path.join(part)))
    }
}

impl ResourceOpener for DirectoryArchives {
    type Resource = Archive;

    fn open(&self, name: &str) -> CacheResult<Archive> {
        let path = self.path_of(name)?;
        let metadata = std::fs::metadata(&path).map_err(|e| CacheError::io(name, e))?;
        if !metadata.is_file() {
            return Err(CacheError::NotFound {
                name: name.to_string(),
            });
        }
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.config.max_archive_bytes {
            return Err(CacheError::TooLarge {
                name: name.to_string(),
                size,
                limit: self.config.max_archive_bytes,
            });
        }
        let bytes = std::fs::read(&path).map_err(|e| CacheError::io(name, e))?;
        Ok(Archive::new(name, bytes))
    }
}
