//! 测试辅助工具
//!
//! 构造运行时、类定义与方法规格的辅助函数

#![allow(dead_code)]

use mop_core::{
    ClassDefinition, ClassHandle, Function, MethodSpec, Runtime, Specializer, Symbol, Value,
};
use std::sync::Arc;

pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

pub fn syms(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(Symbol::new).collect()
}

/// Define a class, panicking on failure
pub fn define(runtime: &Runtime, name: &str, supers: &[&str], slots: &[&str]) -> ClassHandle {
    runtime
        .ensure_class(
            &ClassDefinition::new(name)
                .with_superclasses(supers.iter().copied())
                .with_slots(slots.iter().copied()),
        )
        .unwrap_or_else(|e| panic!("defining {name} failed: {e}"))
}

/// An opaque compiled function carrying a tag
pub fn function(tag: &'static str) -> Function {
    Function::new(Some(sym(tag)), Arc::new(tag))
}

/// Method spec with class specializers for each argument
pub fn method_spec(params: &[&str], specializers: &[&ClassHandle], tag: &'static str) -> MethodSpec {
    MethodSpec::new(
        syms(params),
        specializers
            .iter()
            .map(|class| Specializer::Class((*class).clone()))
            .collect(),
        function(tag),
    )
}

pub fn int(n: i64) -> Value {
    Value::Integer(n)
}
