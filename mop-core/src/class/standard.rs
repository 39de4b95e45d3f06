//! STANDARD-CLASS: user-definable classes with instance storage

use super::{
    c3_linearize, class_object_typep, describe, ClassHandle, ClassKind, ClassMetaobject,
    MetaclassRef, TypeSpec,
};
use crate::error::{MopError, MopResult};
use crate::instance::Instance;
use crate::layout::Layout;
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::{LimitConfig, TARGET_CLASS};
use std::sync::Arc;

/// One generation of a standard class
#[derive(Debug, Clone)]
pub struct StandardClass {
    name: Option<Symbol>,
    metaclass: MetaclassRef,
    direct_superclasses: Vec<ClassHandle>,
    direct_slots: Vec<Symbol>,
    precedence: Vec<ClassHandle>,
    layout: Option<Arc<Layout>>,
    documentation: Option<String>,
    sealed: bool,
}

impl StandardClass {
    /// An unfinalized generation
    pub fn new(
        name: Option<Symbol>,
        metaclass: MetaclassRef,
        direct_superclasses: Vec<ClassHandle>,
        direct_slots: Vec<Symbol>,
    ) -> Self {
        Self {
            name,
            metaclass,
            direct_superclasses,
            direct_slots,
            precedence: Vec::new(),
            layout: None,
            documentation: None,
            sealed: false,
        }
    }

    pub fn with_documentation(mut self, documentation: Option<String>) -> Self {
        self.documentation = documentation;
        self
    }

    /// Kernel construction: precedence and layout are known up front
    pub(crate) fn kernel(
        name: &str,
        metaclass: MetaclassRef,
        direct_superclasses: Vec<ClassHandle>,
        precedence: Vec<ClassHandle>,
        layout: Layout,
    ) -> Self {
        Self {
            name: Some(Symbol::new(name)),
            metaclass,
            direct_superclasses,
            direct_slots: layout.slot_names().to_vec(),
            precedence,
            layout: Some(Arc::new(layout)),
            documentation: None,
            sealed: true,
        }
    }

    /// Compute the finalized generation.
    ///
    /// Every direct superclass must already be finalized. The precedence list
    /// is the C3 linearization; inherited slots are collected walking it from
    /// the most general class down, a redeclaration moving the slot to the
    /// more specific position.
    pub fn finalized(
        &self,
        this: &ClassHandle,
        version: u64,
        limits: &LimitConfig,
    ) -> MopResult<StandardClass> {
        if let Some(pending) = self.direct_superclasses.iter().find(|c| !c.is_finalized()) {
            return Err(MopError::NotFinalized {
                class: pending.describe(),
            });
        }

        let mut precedence = c3_linearize(
            this,
            &describe(self),
            &self.direct_superclasses,
            limits.max_precedence_depth,
        )?;
        precedence.remove(0);

        let mut inherited: Vec<Symbol> = Vec::new();
        for class in precedence.iter().rev() {
            for slot in class.direct_slots() {
                if let Some(pos) = inherited.iter().position(|s| *s == slot) {
                    inherited.remove(pos);
                }
                inherited.push(slot);
            }
        }

        let layout = Layout::build_for(self.name.as_ref(), &self.direct_slots, &inherited)?
            .with_version(version);
        if layout.len() > limits.max_slots {
            return Err(MopError::LayoutTooLarge {
                count: layout.len(),
                limit: limits.max_slots,
            });
        }

        tracing::debug!(
            target: TARGET_CLASS,
            class = %describe(self),
            version,
            slots = layout.len(),
            precedence = precedence.len() + 1,
            "class finalized"
        );

        Ok(StandardClass {
            precedence,
            layout: Some(Arc::new(layout)),
            ..self.clone()
        })
    }

    pub(crate) fn without_layout(&self) -> StandardClass {
        StandardClass {
            precedence: Vec::new(),
            layout: None,
            ..self.clone()
        }
    }
}

impl ClassMetaobject for StandardClass {
    fn kind(&self) -> ClassKind {
        ClassKind::Standard
    }

    fn type_tag(&self) -> &'static str {
        names::STANDARD_CLASS
    }

    fn name(&self) -> Option<&Symbol> {
        self.name.as_ref()
    }

    fn metaclass(&self) -> &MetaclassRef {
        &self.metaclass
    }

    fn direct_superclasses(&self) -> &[ClassHandle] {
        &self.direct_superclasses
    }

    fn direct_slots(&self) -> &[Symbol] {
        &self.direct_slots
    }

    fn inherited_precedence(&self) -> &[ClassHandle] {
        &self.precedence
    }

    fn layout(&self) -> Option<&Arc<Layout>> {
        self.layout.as_ref()
    }

    fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn typep(&self, this: &ClassHandle, candidate: &TypeSpec) -> bool {
        class_object_typep(self, this, candidate)
    }

    fn allocate_instance(&self, this: &ClassHandle) -> MopResult<Value> {
        let layout = self.layout.clone().ok_or_else(|| MopError::NotFinalized {
            class: describe(self),
        })?;
        Ok(Value::Instance(Instance::allocate(this.clone(), layout)))
    }

    fn finalize(
        &self,
        this: &ClassHandle,
        version: u64,
        limits: &LimitConfig,
    ) -> MopResult<Arc<dyn ClassMetaobject>> {
        if self.sealed {
            return Ok(Arc::new(self.clone()));
        }
        Ok(Arc::new(self.finalized(this, version, limits)?))
    }

    fn unfinalized(&self) -> Arc<dyn ClassMetaobject> {
        if self.sealed {
            return Arc::new(self.clone());
        }
        Arc::new(self.without_layout())
    }
}
