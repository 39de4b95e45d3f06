//! The metaclass of method objects (STANDARD-METHOD).
//!
//! Behaves as a standard class except that its layout is fixed when the
//! kernel is built, with one slot per method attribute in a known order.

use super::{
    class_object_typep, ClassHandle, ClassKind, ClassMetaobject, MetaclassRef, StandardClass,
    TypeSpec,
};
use crate::error::MopResult;
use crate::instance::Instance;
use crate::layout::Layout;
use crate::method::{MethodObject, METHOD_SLOT_NAMES};
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::LimitConfig;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StandardMethodMetaclass {
    class: StandardClass,
}

impl StandardMethodMetaclass {
    pub(crate) fn new(
        metaclass: ClassHandle,
        direct_superclasses: Vec<ClassHandle>,
        precedence: Vec<ClassHandle>,
    ) -> Self {
        let layout = Layout::fixed(Symbol::new(names::STANDARD_METHOD), &METHOD_SLOT_NAMES);
        Self {
            class: StandardClass::kernel(
                names::STANDARD_METHOD,
                MetaclassRef::Class(metaclass),
                direct_superclasses,
                precedence,
                layout,
            ),
        }
    }

    /// Allocate a method object with every attribute unbound
    pub fn allocate_method(&self, this: &ClassHandle) -> MopResult<MethodObject> {
        let layout = self.fixed_layout();
        Ok(MethodObject::from_instance(Instance::allocate(
            this.clone(),
            layout,
        )))
    }

    fn fixed_layout(&self) -> Arc<Layout> {
        match self.class.layout() {
            Some(layout) => layout.clone(),
            None => Arc::new(Layout::fixed(
                Symbol::new(names::STANDARD_METHOD),
                &METHOD_SLOT_NAMES,
            )),
        }
    }
}

impl ClassMetaobject for StandardMethodMetaclass {
    fn kind(&self) -> ClassKind {
        ClassKind::MethodMetaclass
    }

    fn type_tag(&self) -> &'static str {
        names::STANDARD_CLASS
    }

    fn name(&self) -> Option<&Symbol> {
        self.class.name()
    }

    fn metaclass(&self) -> &MetaclassRef {
        self.class.metaclass()
    }

    fn direct_superclasses(&self) -> &[ClassHandle] {
        self.class.direct_superclasses()
    }

    fn direct_slots(&self) -> &[Symbol] {
        self.class.direct_slots()
    }

    fn inherited_precedence(&self) -> &[ClassHandle] {
        self.class.inherited_precedence()
    }

    fn layout(&self) -> Option<&Arc<Layout>> {
        self.class.layout()
    }

    fn is_sealed(&self) -> bool {
        true
    }

    fn typep(&self, this: &ClassHandle, candidate: &TypeSpec) -> bool {
        class_object_typep(self, this, candidate)
    }

    fn allocate_instance(&self, this: &ClassHandle) -> MopResult<Value> {
        Ok(self.allocate_method(this)?.into_value())
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
