//! Type-test and printing protocol over every runtime value

use crate::class::{generic_typep, ClassHandle, TypeSpec};
use crate::registry::Kernel;
use crate::symbol::{names, Symbol};
use crate::value::Value;

/// `type-of`: the most specific type name of `value`
pub fn type_of(value: &Value) -> Symbol {
    let name = match value {
        Value::Nil => names::NULL,
        Value::Integer(_) => names::INTEGER,
        Value::Float(_) => names::FLOAT,
        Value::Str(_) => names::STRING,
        Value::Symbol(_) => names::SYMBOL,
        Value::List(_) => names::CONS,
        Value::Function(_) => names::FUNCTION,
        Value::Class(class) => return class.type_of(),
        Value::Instance(instance) => {
            return instance
                .class()
                .name()
                .unwrap_or_else(|| Symbol::new(names::STANDARD_OBJECT))
        }
        Value::GenericFunction(_) => names::STANDARD_GENERIC_FUNCTION,
        Value::EqlSpecializer(_) => names::EQL_SPECIALIZER,
    };
    Symbol::new(name)
}

/// `class-of`
pub fn class_of(kernel: &Kernel, value: &Value) -> ClassHandle {
    match value {
        Value::Nil => kernel.null.clone(),
        Value::Integer(_) => kernel.integer.clone(),
        Value::Float(_) => kernel.float.clone(),
        Value::Str(_) => kernel.string.clone(),
        Value::Symbol(_) => kernel.symbol.clone(),
        Value::List(_) => kernel.cons.clone(),
        Value::Function(_) => kernel.function.clone(),
        Value::Class(class) => class.class_of(),
        Value::Instance(instance) => instance.class().clone(),
        Value::GenericFunction(_) => kernel.standard_generic_function.clone(),
        Value::EqlSpecializer(_) => kernel.eql_specializer.clone(),
    }
}

/// `typep`; class objects answer through their own variant
pub fn typep(kernel: &Kernel, value: &Value, candidate: &TypeSpec) -> bool {
    match value {
        Value::Class(class) => class.typep(candidate),
        other => generic_typep(&class_of(kernel, other), candidate),
    }
}

/// Printed representation
pub fn print(value: &Value) -> String {
    value.to_string()
}
