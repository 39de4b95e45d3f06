//! Mop Core - 元对象层
//!
//! Class metaobjects, instance layouts, method objects and the class
//! registry of a dynamically typed object system. Forward references to
//! classes are first-class placeholders that later definitions resolve in
//! place; redefinition publishes a new class generation and instances
//! migrate lazily on their next named slot access.
//!
//! The evaluator, dispatch and method combination live elsewhere.

pub mod class;
pub mod error;
pub mod generic;
pub mod instance;
pub mod layout;
pub mod method;
pub mod protocol;
pub mod registry;
pub mod runtime;
pub mod symbol;
pub mod value;

pub use class::{
    BuiltInClass, ClassHandle, ClassKind, ClassMetaobject, ClassState, ForwardReferencedClass,
    MetaclassRef, StandardClass, StandardMethodMetaclass, TypeSpec,
};
pub use error::{MopError, MopResult};
pub use generic::{GenericFunction, GenericFunctionRef};
pub use instance::Instance;
pub use layout::Layout;
pub use method::{MethodObject, MethodSlot, Specializer, METHOD_SLOT_NAMES};
pub use registry::{ClassDefinition, ClassRegistry, Kernel};
pub use runtime::{MethodSpec, Runtime};
pub use symbol::Symbol;
pub use value::{Function, Value};
