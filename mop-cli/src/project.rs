//! project.json: which units to load and what to ask afterwards

use mop_api::{literal, RunConfig};
use mop_config::{CacheConfig, LimitConfig};
use mop_core::{Runtime, Symbol, Value};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// project.json 结构
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectJson {
    /// 归档目录（相对于 project.json）
    pub archive_root: String,
    /// 按顺序加载的定义单元
    pub units: Vec<String>,
    #[serde(default)]
    pub queries: Vec<Query>,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    #[serde(default)]
    pub log_level: Option<String>,
    /// 按子系统覆盖日志级别
    #[serde(default)]
    pub log: HashMap<String, String>,
    #[serde(default)]
    pub limits: LimitConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub stop_on_error: Option<bool>,
}

/// A `typep` question asked after loading
#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    /// A literal, a class name, or `{"instance": class-name}`
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Read and parse project.json
pub fn read_project(path: &Path) -> Result<ProjectJson, String> {
    if !path.exists() {
        return Err(format!(
            "'{}' not found\n\nhint: create it with 'archive_root' and 'units' fields",
            path.display()
        ));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    parse_project(&content).map_err(|e| format!("cannot parse '{}': {}", path.display(), e))
}

pub fn parse_project(content: &str) -> Result<ProjectJson, String> {
    let project: ProjectJson = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if project.units.is_empty() {
        return Err("'units' must name at least one definition unit".to_string());
    }
    Ok(project)
}

/// Resolve the archive root relative to the project file's directory
pub fn resolve_archive_root(project_path: &Path, root: &str) -> PathBuf {
    let base_dir = project_path.parent().unwrap_or(Path::new("."));
    base_dir.join(root)
}

pub fn build_run_config(project: &ProjectJson) -> RunConfig {
    let defaults = RunConfig::default();
    RunConfig {
        limits: project.limits.clone(),
        cache: project.cache.clone(),
        stop_on_error: project.stop_on_error.unwrap_or(defaults.stop_on_error),
    }
}

/// Turn a query value into a runtime value. Class names denote the class
/// object; `{"instance": name}` allocates a fresh instance.
pub fn query_value(runtime: &Runtime, value: &serde_json::Value) -> Result<Value, String> {
    if let Some(name) = value.get("instance").and_then(|v| v.as_str()) {
        let class = runtime
            .find_class(&Symbol::new(name))
            .ok_or_else(|| format!("no class named {name}"))?;
        return runtime
            .make_instance(&class, &[])
            .map(Value::Instance)
            .map_err(|e| e.to_string());
    }
    if let Some(class) = value.as_str().and_then(|name| runtime.find_class(&Symbol::new(name))) {
        return Ok(Value::Class(class));
    }
    literal(value)
}

/// Answer one query as a printable line
pub fn answer(runtime: &Runtime, query: &Query) -> Result<String, String> {
    let value = query_value(runtime, &query.value)?;
    let holds = runtime
        .typep(&value, &Value::symbol(&query.type_name))
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "(typep {} '{}) => {}",
        runtime.print(&value),
        query.type_name,
        if holds { "T" } else { "NIL" }
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mop_core::ClassDefinition;
    use serde_json::json;

    fn query(value: serde_json::Value, type_name: &str) -> Query {
        Query {
            value,
            type_name: type_name.to_string(),
        }
    }

    fn shapes() -> Runtime {
        let runtime = Runtime::new();
        runtime
            .ensure_class(&ClassDefinition::new("SHAPE"))
            .unwrap();
        runtime
            .ensure_class(&ClassDefinition::new("CIRCLE").with_superclasses(["SHAPE"]))
            .unwrap();
        runtime
    }

    #[test]
    fn test_parse_project_defaults() {
        let project =
            parse_project(r#"{ "archive_root": "units", "units": ["a.json"] }"#).unwrap();
        assert!(project.queries.is_empty());
        assert_eq!(project.limits, LimitConfig::default());
        assert!(build_run_config(&project).stop_on_error);
    }

    #[test]
    fn test_parse_project_rejects_empty_units() {
        assert!(parse_project(r#"{ "archive_root": "units", "units": [] }"#).is_err());
        assert!(parse_project(r#"{ "archive_root": "units" }"#).is_err());
    }

    #[test]
    fn test_resolve_archive_root() {
        let root = resolve_archive_root(Path::new("demo/project.json"), "units");
        assert_eq!(root, PathBuf::from("demo/units"));
    }

    #[test]
    fn test_answer_queries() {
        let runtime = shapes();
        assert_eq!(
            answer(&runtime, &query(json!(3), "INTEGER")).unwrap(),
            "(typep 3 'INTEGER) => T"
        );
        assert_eq!(
            answer(&runtime, &query(json!({ "instance": "CIRCLE" }), "SHAPE")).unwrap(),
            "(typep #<CIRCLE> 'SHAPE) => T"
        );
        assert_eq!(
            answer(&runtime, &query(json!("CIRCLE"), "STANDARD-CLASS")).unwrap(),
            "(typep #<STANDARD-CLASS CIRCLE> 'STANDARD-CLASS) => T"
        );
        assert_eq!(
            answer(&runtime, &query(json!("RED"), "SHAPE")).unwrap(),
            "(typep RED 'SHAPE) => NIL"
        );
    }

    #[test]
    fn test_unknown_instance_class() {
        let runtime = shapes();
        assert!(answer(&runtime, &query(json!({ "instance": "SQUARE" }), "SHAPE")).is_err());
    }
}
