//! 类元对象（Class metaobjects）
//!
//! Every class variant implements the [`ClassMetaobject`] capability and is
//! reached through a [`ClassHandle`], a stable cell whose pointee is the
//! class's current generation. Behavior shared by all variants (the generic
//! type test and the printed form) lives in free functions here.

mod builtin;
mod forward;
mod handle;
mod method_class;
mod precedence;
mod standard;

pub use builtin::BuiltInClass;
pub use forward::ForwardReferencedClass;
pub use handle::ClassHandle;
pub use method_class::StandardMethodMetaclass;
pub use standard::StandardClass;

pub(crate) use forward::check_class_name;
pub(crate) use precedence::c3_linearize;

use crate::error::{MopError, MopResult};
use crate::layout::Layout;
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::LimitConfig;
use std::fmt;
use std::sync::Arc;

/// Which variant implements a class object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    ForwardReferenced,
    Standard,
    MethodMetaclass,
    BuiltIn,
}

/// Lifecycle state of a class object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassState {
    /// Forward-referenced; no layout, no instances
    Placeholder,
    /// Defined, but some superclass is not finalized yet
    Unfinalized,
    /// Layout stable; instances can be allocated
    Finalized,
}

/// The class of a class object
#[derive(Clone, Debug)]
pub enum MetaclassRef {
    /// The class is an instance of itself (STANDARD-CLASS)
    Itself,
    Class(ClassHandle),
}

/// A type designator accepted by `typep`
#[derive(Clone, Debug)]
pub enum TypeSpec {
    Symbol(Symbol),
    Class(ClassHandle),
}

impl TypeSpec {
    pub fn named(name: impl AsRef<str>) -> Self {
        TypeSpec::Symbol(Symbol::new(name))
    }

    /// Interpret a runtime value as a type designator
    pub fn from_value(value: &Value) -> MopResult<TypeSpec> {
        match value {
            Value::Symbol(symbol) => Ok(TypeSpec::Symbol(symbol.clone())),
            Value::Nil => Ok(TypeSpec::named(names::NIL)),
            Value::Class(class) => Ok(TypeSpec::Class(class.clone())),
            other => Err(MopError::type_error(other.clone(), "(OR SYMBOL CLASS)")),
        }
    }

    /// Whether this designator is the symbol `name`
    pub fn names(&self, name: &str) -> bool {
        matches!(self, TypeSpec::Symbol(symbol) if symbol.is(name))
    }

    /// Whether this designator is exactly `class`
    pub fn is_class(&self, class: &ClassHandle) -> bool {
        matches!(self, TypeSpec::Class(c) if c == class)
    }
}

/// Capability shared by every class variant.
///
/// A value implementing this trait is one immutable *generation* of a class;
/// redefinition builds a new generation and swaps it into the class's handle.
pub trait ClassMetaobject: Send + Sync + fmt::Debug {
    fn kind(&self) -> ClassKind;

    /// Fixed tag naming the variant; `type-of` of the class object
    fn type_tag(&self) -> &'static str;

    fn name(&self) -> Option<&Symbol>;

    fn metaclass(&self) -> &MetaclassRef;

    fn direct_superclasses(&self) -> &[ClassHandle];

    fn direct_slots(&self) -> &[Symbol];

    /// Class precedence list without the class itself; empty until finalized
    fn inherited_precedence(&self) -> &[ClassHandle];

    fn layout(&self) -> Option<&Arc<Layout>>;

    fn documentation(&self) -> Option<&str> {
        None
    }

    fn state(&self) -> ClassState {
        if self.layout().is_some() {
            ClassState::Finalized
        } else {
            ClassState::Unfinalized
        }
    }

    /// Kernel classes whose shape may not change
    fn is_sealed(&self) -> bool {
        false
    }

    /// Type test for the class object itself
    fn typep(&self, this: &ClassHandle, candidate: &TypeSpec) -> bool;

    fn allocate_instance(&self, this: &ClassHandle) -> MopResult<Value>;

    /// Build the finalized generation of this class
    fn finalize(
        &self,
        this: &ClassHandle,
        version: u64,
        limits: &LimitConfig,
    ) -> MopResult<Arc<dyn ClassMetaobject>>;

    /// The same definition with its layout withdrawn
    fn unfinalized(&self) -> Arc<dyn ClassMetaobject>;
}

/// `#<TAG NAME>` or `#<TAG>`; never read back
pub fn print_unreadable(tag: &str, name: Option<&Symbol>) -> String {
    match name {
        Some(name) => format!("#<{tag} {name}>"),
        None => format!("#<{tag}>"),
    }
}

/// Printed form of a class object
pub fn describe(meta: &dyn ClassMetaobject) -> String {
    print_unreadable(meta.type_tag(), meta.name())
}

/// Object-level type test: does `class` (the class of some object) satisfy
/// `candidate`? Symbols match by class name anywhere in the precedence list.
pub fn generic_typep(class: &ClassHandle, candidate: &TypeSpec) -> bool {
    match candidate {
        TypeSpec::Symbol(symbol) if symbol.is(names::T) => true,
        TypeSpec::Symbol(symbol) if symbol.is(names::NIL) => false,
        TypeSpec::Symbol(symbol) => class
            .precedence_list()
            .iter()
            .any(|c| c.name().as_ref() == Some(symbol)),
        TypeSpec::Class(target) => class.is_subclass_of(target),
    }
}

/// Type test for class objects: variant tag first, then the metaclass
/// identity, then the generic object-level test.
pub fn class_object_typep(
    meta: &dyn ClassMetaobject,
    this: &ClassHandle,
    candidate: &TypeSpec,
) -> bool {
    if candidate.names(meta.type_tag()) {
        return true;
    }
    let metaclass = match meta.metaclass() {
        MetaclassRef::Itself => this.clone(),
        MetaclassRef::Class(class) => class.clone(),
    };
    candidate.is_class(&metaclass) || generic_typep(&metaclass, candidate)
}
