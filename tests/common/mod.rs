//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use mop_workspace::{Loader, MemoryArchives, RunConfig, Symbol, Value};

/// Loader over an in-memory archive set built from `(name, json)` pairs
pub fn loader_with(units: &[(&str, &str)]) -> Loader<MemoryArchives> {
    let archives = MemoryArchives::new();
    for (name, text) in units {
        archives.insert(*name, text.as_bytes().to_vec());
    }
    Loader::new(archives, RunConfig::default())
}

pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

/// `typep` with a type name, panicking on a bad designator
pub fn is_a<O>(loader: &Loader<O>, value: &Value, type_name: &str) -> bool
where
    O: mop_workspace::cache::ResourceOpener<Resource = mop_workspace::Archive>,
{
    loader
        .runtime()
        .typep(value, &Value::symbol(type_name))
        .unwrap_or_else(|e| panic!("typep {value} {type_name}: {e}"))
}

/// Allocate an instance of the class named `name`
pub fn instance_of<O>(loader: &Loader<O>, name: &str) -> Value
where
    O: mop_workspace::cache::ResourceOpener<Resource = mop_workspace::Archive>,
{
    let runtime = loader.runtime();
    let class = runtime
        .find_class(&sym(name))
        .unwrap_or_else(|| panic!("no class {name}"));
    runtime
        .allocate_instance(&class)
        .unwrap_or_else(|e| panic!("allocating {name}: {e}"))
}
