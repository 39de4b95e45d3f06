//! Mop Resource Cache
//!
//! Named resources opened on first acquire, shared while held and closed on
//! the last release. Backends decide what "open" means; the archive backends
//! serve compiled definition units from memory or from a directory.
//!
//! # Usage
//! ```rust,ignore
//! use mop_cache::{MemoryArchives, ResourceCache};
//!
//! let archives = MemoryArchives::with_archives([("core.json", b"{}".to_vec())]);
//! let cache = ResourceCache::new(archives);
//! let unit = cache.acquire("core.json").unwrap();
//! cache.release("core.json");
//! ```

mod archive;
mod cache;
mod directory;
mod error;
mod memory;

pub use archive::{validate_name, Archive, ResourceOpener};
pub use cache::ResourceCache;
pub use directory::DirectoryArchives;
pub use error::{CacheError, CacheResult};
pub use memory::MemoryArchives;

/// Cache over an in-memory archive set.
pub fn memory_cache(archives: MemoryArchives) -> ResourceCache<MemoryArchives> {
    ResourceCache::new(archives)
}

/// Cache over the archives of a directory.
pub fn directory_cache(root: impl Into<std::path::PathBuf>) -> ResourceCache<DirectoryArchives> {
    ResourceCache::new(DirectoryArchives::new(root))
}
