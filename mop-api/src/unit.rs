//! Compiled definition units
//!
//! A unit is the JSON form the compiler emits for one source file: class
//! definitions, generic function declarations and methods. Decoding only
//! checks shape; names are resolved against a runtime when the unit is
//! installed.

use crate::error::MopApiError;
use mop_core::{ClassDefinition, Symbol, Value};
use serde::Deserialize;

/// One compiled definition unit
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionUnit {
    pub classes: Vec<ClassDecl>,
    pub generic_functions: Vec<GenericFunctionDecl>,
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub superclasses: Vec<String>,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenericFunctionDecl {
    pub name: String,
    pub lambda_list: Vec<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub generic_function: String,
    pub lambda_list: Vec<String>,
    #[serde(default)]
    pub specializers: Vec<SpecializerDecl>,
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Reference to the compiled method body
    pub function: String,
    #[serde(default)]
    pub fast_function: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A specializer as written in a unit: a class name or `{"eql": literal}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpecializerDecl {
    Class(String),
    Eql { eql: serde_json::Value },
}

/// Opaque code payload carried by functions built from a unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledRef(pub String);

impl DefinitionUnit {
    /// Decode `text`; `unit` names the source in errors
    pub fn from_json(unit: &str, text: &str) -> Result<Self, MopApiError> {
        serde_json::from_str(text).map_err(|err| MopApiError::decode(unit, &err))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.generic_functions.is_empty() && self.methods.is_empty()
    }
}

impl ClassDecl {
    pub fn to_definition(&self) -> ClassDefinition {
        let definition = ClassDefinition::new(&self.name)
            .with_superclasses(&self.superclasses)
            .with_slots(&self.slots);
        match &self.documentation {
            Some(doc) => definition.with_documentation(doc.clone()),
            None => definition,
        }
    }
}

pub(crate) fn symbols(names: &[String]) -> Vec<Symbol> {
    names.iter().map(Symbol::new).collect()
}

/// Convert a JSON literal into a runtime value.
///
/// Strings are symbols, `{"string": s}` is a string, arrays are lists,
/// `null` and `false` are `NIL`, `true` is `T`.
pub fn literal(json: &serde_json::Value) -> Result<Value, String> {
    use serde_json::Value as Json;
    match json {
        Json::Null | Json::Bool(false) => Ok(Value::Nil),
        Json::Bool(true) => Ok(Value::symbol("T")),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| format!("number {n} is out of range")),
        },
        Json::String(name) => Ok(Value::symbol(name)),
        Json::Array(items) => items
            .iter()
            .map(literal)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        Json::Object(fields) => match (fields.len(), fields.get("string")) {
            (1, Some(Json::String(text))) => Ok(Value::string(text)),
            _ => Err(format!("unsupported literal object {json}")),
        },
    }
}
