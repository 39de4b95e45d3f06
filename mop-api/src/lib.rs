//! Mop API - 加载与运行接口
//!
//! Loads compiled definition units from an archive cache into a shared
//! runtime, with one configuration type and one error type for callers.
//!
//! # Usage
//! ```rust,ignore
//! use mop_api::{Loader, RunConfig};
//! use mop_cache::MemoryArchives;
//!
//! let archives = MemoryArchives::with_archives([("shapes.json", SHAPES.as_bytes().to_vec())]);
//! let loader = Loader::new(archives, RunConfig::default());
//! let report = loader.load_unit("shapes.json")?;
//! ```

pub mod config;
pub mod error;
mod loader;
pub mod unit;

pub use config::{config_or_default, init, RunConfig};
pub use error::{ErrorReport, MopApiError};
pub use loader::{LoadReport, Loader};
pub use unit::{
    literal, ClassDecl, CompiledRef, DefinitionUnit, GenericFunctionDecl, MethodDecl,
    SpecializerDecl,
};

// Re-export the runtime so callers need only this crate
pub use mop_core::{ClassHandle, Runtime, Symbol, Value};

/// Load `units` from an in-memory archive set with the default configuration
pub fn load_from_memory<S: AsRef<str>>(
    archives: mop_cache::MemoryArchives,
    units: &[S],
) -> Result<(Loader<mop_cache::MemoryArchives>, Vec<LoadReport>), MopApiError> {
    let loader = Loader::new(archives, RunConfig::default());
    let reports = loader.load_all(units)?;
    Ok((loader, reports))
}
