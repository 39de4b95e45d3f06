//! BUILT-IN-CLASS: classes of immediate and runtime-native values

use super::{
    class_object_typep, ClassHandle, ClassKind, ClassMetaobject, MetaclassRef, TypeSpec,
};
use crate::error::{MopError, MopResult};
use crate::layout::Layout;
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::LimitConfig;
use std::sync::Arc;

/// A kernel class with no instance storage; never redefined
#[derive(Debug, Clone)]
pub struct BuiltInClass {
    name: Symbol,
    metaclass: MetaclassRef,
    direct_superclasses: Vec<ClassHandle>,
    precedence: Vec<ClassHandle>,
    layout: Arc<Layout>,
}

impl BuiltInClass {
    pub(crate) fn new(
        name: &str,
        metaclass: ClassHandle,
        direct_superclasses: Vec<ClassHandle>,
        precedence: Vec<ClassHandle>,
    ) -> Self {
        let name = Symbol::new(name);
        Self {
            layout: Arc::new(Layout::empty(Some(name.clone()))),
            name,
            metaclass: MetaclassRef::Class(metaclass),
            direct_superclasses,
            precedence,
        }
    }
}

impl ClassMetaobject for BuiltInClass {
    fn kind(&self) -> ClassKind {
        ClassKind::BuiltIn
    }

    fn type_tag(&self) -> &'static str {
        names::BUILT_IN_CLASS
    }

    fn name(&self) -> Option<&Symbol> {
        Some(&self.name)
    }

    fn metaclass(&self) -> &MetaclassRef {
        &self.metaclass
    }

    fn direct_superclasses(&self) -> &[ClassHandle] {
        &self.direct_superclasses
    }

    fn direct_slots(&self) -> &[Symbol] {
        &[]
    }

    fn inherited_precedence(&self) -> &[ClassHandle] {
        &self.precedence
    }

    fn layout(&self) -> Option<&Arc<Layout>> {
        Some(&self.layout)
    }

    fn is_sealed(&self) -> bool {
        true
    }

    fn typep(&self, this: &ClassHandle, candidate: &TypeSpec) -> bool {
        class_object_typep(self, this, candidate)
    }

    /// Built-in values come from the evaluator, never from allocation
    fn allocate_instance(&self, this: &ClassHandle) -> MopResult<Value> {
        Err(MopError::type_error(
            Value::Class(this.clone()),
            names::STANDARD_CLASS,
        ))
    }

    fn finalize(
        &self,
        _this: &ClassHandle,
        _version: u64,
        _limits: &LimitConfig,
    ) -> MopResult<Arc<dyn ClassMetaobject>> {
        Ok(Arc::new(self.clone()))
    }

    fn unfinalized(&self) -> Arc<dyn ClassMetaobject> {
        Arc::new(self.clone())
    }
}
