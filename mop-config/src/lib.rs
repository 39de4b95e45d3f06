//! Mop Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all mop crates.

use serde::Deserialize;

/// Log target for registry operations
pub const TARGET_REGISTRY: &str = "mop::registry";
/// Log target for class finalization and redefinition
pub const TARGET_CLASS: &str = "mop::class";
/// Log target for layout construction
pub const TARGET_LAYOUT: &str = "mop::layout";
/// Log target for method objects and generic functions
pub const TARGET_METHOD: &str = "mop::method";
/// Log target for the resource cache
pub const TARGET_CACHE: &str = "mop::cache";
/// Log target for definition-unit loading
pub const TARGET_LOADER: &str = "mop::loader";

/// Limits enforced while building class metaobjects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum number of slots in a single layout
    pub max_slots: usize,
    /// Maximum length of a class precedence list
    pub max_precedence_depth: usize,
}

/// Configuration for the archive cache
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Largest archive (in bytes) the cache will open
    pub max_archive_bytes: usize,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MopConfig {
    pub limits: LimitConfig,
    pub cache: CacheConfig,
}

/// Subsystem enum for subsystem-specific log configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Registry,
    Class,
    Layout,
    Method,
    Cache,
    Loader,
}

impl Subsystem {
    /// All subsystems, in the order they are listed in filters
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Registry,
        Subsystem::Class,
        Subsystem::Layout,
        Subsystem::Method,
        Subsystem::Cache,
        Subsystem::Loader,
    ];

    /// Get the string name of the subsystem
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Registry => "registry",
            Subsystem::Class => "class",
            Subsystem::Layout => "layout",
            Subsystem::Method => "method",
            Subsystem::Cache => "cache",
            Subsystem::Loader => "loader",
        }
    }

    /// Get the log target name for this subsystem
    pub fn target(&self) -> &'static str {
        match self {
            Subsystem::Registry => TARGET_REGISTRY,
            Subsystem::Class => TARGET_CLASS,
            Subsystem::Layout => TARGET_LAYOUT,
            Subsystem::Method => TARGET_METHOD,
            Subsystem::Cache => TARGET_CACHE,
            Subsystem::Loader => TARGET_LOADER,
        }
    }

    /// Parse a subsystem from its short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_slots: 4096,
            max_precedence_depth: 256,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: 16 * 1024 * 1024,
        }
    }
}

impl MopConfig {
    /// Parse a configuration from JSON text; missing fields take defaults
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
