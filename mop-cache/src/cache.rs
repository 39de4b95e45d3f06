//! Reference-counted resource cache

use crate::archive::{validate_name, ResourceOpener};
use crate::error::CacheResult;
use mop_config::TARGET_CACHE;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct Entry<R> {
    resource: Arc<R>,
    count: usize,
}

/// Named resources shared between holders.
///
/// The first `acquire` of a name opens the resource; later ones share it and
/// bump its count. The resource is closed and evicted when the count drops
/// to zero. Opening happens under the cache lock, so concurrent first
/// acquires of one name open it exactly once.
pub struct ResourceCache<O: ResourceOpener> {
    opener: O,
    entries: Mutex<HashMap<String, Entry<O::Resource>>>,
}

impl<O: ResourceOpener> ResourceCache<O> {
    pub fn new(opener: O) -> Self {
        Self {
            opener,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn acquire(&self, name: &str) -> CacheResult<Arc<O::Resource>> {
        validate_name(name)?;
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(name) {
            entry.count += 1;
            tracing::trace!(target: TARGET_CACHE, name, count = entry.count, "resource shared");
            return Ok(Arc::clone(&entry.resource));
        }

        let resource = Arc::new(self.opener.open(name)?);
        entries.insert(
            name.to_string(),
            Entry {
                resource: Arc::clone(&resource),
                count: 1,
            },
        );
        tracing::debug!(target: TARGET_CACHE, name, "resource opened");
        Ok(resource)
    }

    /// Drop one hold on `name`. Returns true when this closed the resource.
    /// Releasing a name that is not open does nothing.
    pub fn release(&self, name: &str) -> bool {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(name) else {
            tracing::trace!(target: TARGET_CACHE, name, "release of unknown resource ignored");
            return false;
        };
        entry.count -= 1;
        if entry.count > 0 {
            tracing::trace!(target: TARGET_CACHE, name, count = entry.count, "resource released");
            return false;
        }

        if let Some(entry) = entries.remove(name) {
            self.opener.close(name, &entry.resource);
        }
        tracing::debug!(target: TARGET_CACHE, name, "resource closed");
        true
    }

    /// Current holder count; zero if not open
    pub fn ref_count(&self, name: &str) -> usize {
        self.entries.lock().get(name).map_or(0, |entry| entry.count)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// Number of open resources
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Names of the open resources, sorted
    pub fn open_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
