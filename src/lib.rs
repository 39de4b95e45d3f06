//! Mop - a metaobject layer for a dynamically typed object system
//!
//! # Architecture
//!
//! ```text
//! mop-config/  - Pure configuration data and log target names
//! mop-core/    - Class metaobjects, layouts, registry, method objects
//! mop-cache/   - Reference-counted resource cache with archive backends
//! mop-api/     - Definition-unit loader, run configuration, error reports
//! mop-cli/     - `mop` command line front end
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use mop_workspace::{ClassDefinition, Runtime, Value};
//!
//! let runtime = Runtime::new();
//! let point = runtime.ensure_class(&ClassDefinition::new("POINT").with_slots(["X", "Y"]))?;
//! let p = runtime.allocate_instance(&point)?;
//! assert!(runtime.typep(&p, &Value::symbol("STANDARD-OBJECT"))?);
//! ```

pub use mop_api as api;
pub use mop_cache as cache;
pub use mop_config as config;
pub use mop_core as core;

// 重导出常用类型
pub use mop_api::{ErrorReport, LoadReport, Loader, MopApiError, RunConfig};
pub use mop_cache::{Archive, CacheError, DirectoryArchives, MemoryArchives, ResourceCache};
pub use mop_config::{CacheConfig, LimitConfig, MopConfig, Subsystem};
pub use mop_core::{
    ClassDefinition, ClassHandle, ClassState, Instance, Layout, MethodObject, MopError, Runtime,
    Specializer, Symbol, Value,
};
