//! ResourceOpener trait and the archive resource

use crate::error::{CacheError, CacheResult};

/// Opens and closes named resources on behalf of a [`ResourceCache`].
///
/// [`ResourceCache`]: crate::ResourceCache
pub trait ResourceOpener: Send + Sync {
    type Resource: Send + Sync;

    /// Open the resource called `name`
    fn open(&self, name: &str) -> CacheResult<Self::Resource>;

    /// Called once when the last holder releases `name`
    fn close(&self, name: &str, resource: &Self::Resource) {
        let _ = (name, resource);
    }
}

/// A named blob, typically a compiled definition unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    name: String,
    bytes: Vec<u8>,
}

impl Archive {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }
}

/// Archive names are relative, `/`-separated and never climb out of the root
pub fn validate_name(name: &str) -> CacheResult<()> {
    let reason = if name.is_empty() {
        Some("empty name")
    } else if name.starts_with('/') {
        Some("absolute names are not allowed")
    } else if name.contains('\\') || name.contains('\0') {
        Some("name contains a forbidden character")
    } else if name.split('/').any(|part| part == ".." || part.is_empty()) {
        Some("name has an empty or parent segment")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(CacheError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
