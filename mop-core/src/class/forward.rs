//! FORWARD-REFERENCED-CLASS: placeholder for a name used before definition

use super::{
    class_object_typep, describe, ClassHandle, ClassKind, ClassMetaobject, ClassState,
    MetaclassRef, TypeSpec,
};
use crate::error::{MopError, MopResult};
use crate::layout::Layout;
use crate::registry::ClassRegistry;
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::LimitConfig;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ForwardReferencedClass {
    name: Symbol,
    metaclass: MetaclassRef,
}

impl ForwardReferencedClass {
    pub fn new(name: Symbol, metaclass: ClassHandle) -> Self {
        Self {
            name,
            metaclass: MetaclassRef::Class(metaclass),
        }
    }

    /// `make-forward-referenced-class`: validate `name`, then register a
    /// placeholder under it in `registry`
    pub fn construct(registry: &ClassRegistry, name: &Value) -> MopResult<ClassHandle> {
        let name = validate_class_name(name)?;
        registry.install_placeholder(name)
    }
}

const CLASS_NAME_TYPE: &str = "(AND SYMBOL (NOT NULL))";

/// A class name is any non-NIL, non-empty symbol
pub(crate) fn validate_class_name(name: &Value) -> MopResult<Symbol> {
    match name {
        Value::Symbol(symbol) => {
            check_class_name(symbol)?;
            Ok(symbol.clone())
        }
        other => Err(MopError::type_error(other.clone(), CLASS_NAME_TYPE)),
    }
}

pub(crate) fn check_class_name(name: &Symbol) -> MopResult<()> {
    if name.is(names::NIL) || name.name().is_empty() {
        return Err(MopError::type_error(Value::Symbol(name.clone()), CLASS_NAME_TYPE));
    }
    Ok(())
}

impl ClassMetaobject for ForwardReferencedClass {
    fn kind(&self) -> ClassKind {
        ClassKind::ForwardReferenced
    }

    fn type_tag(&self) -> &'static str {
        names::FORWARD_REFERENCED_CLASS
    }

    fn name(&self) -> Option<&Symbol> {
        Some(&self.name)
    }

    fn metaclass(&self) -> &MetaclassRef {
        &self.metaclass
    }

    fn direct_superclasses(&self) -> &[ClassHandle] {
        &[]
    }

    fn direct_slots(&self) -> &[Symbol] {
        &[]
    }

    fn inherited_precedence(&self) -> &[ClassHandle] {
        &[]
    }

    fn layout(&self) -> Option<&Arc<Layout>> {
        None
    }

    fn state(&self) -> ClassState {
        ClassState::Placeholder
    }

    fn typep(&self, this: &ClassHandle, candidate: &TypeSpec) -> bool {
        class_object_typep(self, this, candidate)
    }

    fn allocate_instance(&self, _this: &ClassHandle) -> MopResult<Value> {
        Err(MopError::NotFinalized {
            class: describe(self),
        })
    }

    fn finalize(
        &self,
        _this: &ClassHandle,
        _version: u64,
        _limits: &LimitConfig,
    ) -> MopResult<Arc<dyn ClassMetaobject>> {
        Err(MopError::NotFinalized {
            class: describe(self),
        })
    }

    fn unfinalized(&self) -> Arc<dyn ClassMetaobject> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_class_name() {
        assert_eq!(
            validate_class_name(&Value::symbol("FOO")).unwrap(),
            Symbol::new("FOO")
        );
        for bad in [
            Value::Integer(42),
            Value::Nil,
            Value::string("FOO"),
            Value::symbol("NIL"),
            Value::symbol(""),
        ] {
            let err = validate_class_name(&bad).unwrap_err();
            assert_eq!(err.kind(), "type-error");
        }
    }
}
