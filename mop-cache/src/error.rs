//! Cache Error Types

use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Error type for cache operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// No resource of that name
    #[error("archive not found: {name}")]
    NotFound { name: String },

    /// The name cannot address a resource
    #[error("invalid archive name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The resource exceeds the configured size limit
    #[error("archive {name} is {size} bytes, limit is {limit}")]
    TooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    /// IO error
    #[error("IO error on {name}: {message}")]
    Io { name: String, message: String },
}

impl CacheError {
    pub(crate) fn io(name: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            CacheError::NotFound {
                name: name.to_string(),
            }
        } else {
            CacheError::Io {
                name: name.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// The resource name the error is about
    pub fn name(&self) -> &str {
        match self {
            CacheError::NotFound { name }
            | CacheError::InvalidName { name, .. }
            | CacheError::TooLarge { name, .. }
            | CacheError::Io { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = CacheError::io(
            "core.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(
            err,
            CacheError::NotFound {
                name: "core.json".to_string()
            }
        );
    }

    #[test]
    fn test_display() {
        let err = CacheError::TooLarge {
            name: "big.json".to_string(),
            size: 10,
            limit: 4,
        };
        assert_eq!(err.to_string(), "archive big.json is 10 bytes, limit is 4");
        assert_eq!(err.name(), "big.json");
    }
}
