//! 错误类型 (Core 层)
//!
//! Every failure in the metaobject layer is returned as a `MopError`; the
//! surrounding evaluator maps these onto its own non-local exit mechanism.

use crate::symbol::Symbol;
use crate::value::Value;
use thiserror::Error;

/// Result alias used throughout the core
pub type MopResult<T> = Result<T, MopError>;

/// Unified metaobject-layer error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MopError {
    /// An operand did not satisfy a required type constraint
    #[error("type error: {datum} is not of type {expected}")]
    TypeError { datum: Value, expected: String },

    /// Allocation or slot access on a class without a stable layout
    #[error("class {class} is not finalized")]
    NotFinalized { class: String },

    /// Layout construction could not disambiguate a slot name collision
    #[error("duplicate slot {slot} in layout of {}", owner_name(.owner))]
    DuplicateSlot { slot: Symbol, owner: Option<Symbol> },

    /// A superclass edge would close a cycle
    #[error("class {class} cannot inherit from {superclass}: superclass graph would be cyclic")]
    CyclicSuperclass { class: Symbol, superclass: Symbol },

    /// C3 linearization found no consistent precedence order
    #[error("inconsistent class precedence list for {class}")]
    InconsistentPrecedence { class: String },

    /// Kernel classes with a fixed shape cannot be redefined
    #[error("class {name} is sealed and cannot be redefined")]
    SealedClass { name: Symbol },

    /// A named slot was read while unbound
    #[error("slot {slot} is unbound in {instance}")]
    UnboundSlot { slot: Symbol, instance: String },

    /// The named slot does not exist in the instance's layout
    #[error("{class} has no slot named {slot}")]
    MissingSlot { slot: Symbol, class: String },

    /// Positional slot access outside the layout
    #[error("slot index {index} out of range for layout of {len} slots")]
    SlotIndexOutOfRange { index: usize, len: usize },

    /// A layout exceeded the configured slot ceiling
    #[error("layout of {count} slots exceeds the limit of {limit}")]
    LayoutTooLarge { count: usize, limit: usize },

    /// A class precedence list exceeded the configured depth
    #[error("class precedence list of {class} exceeds the limit of {limit}")]
    HierarchyTooDeep { class: String, limit: usize },

    /// A method's specializers do not match the generic function's lambda list
    #[error("method for {generic_function} has {actual} specializers, expected {expected}")]
    IncongruentLambdaList {
        generic_function: Symbol,
        expected: usize,
        actual: usize,
    },
}

fn owner_name(owner: &Option<Symbol>) -> String {
    match owner {
        Some(name) => name.to_string(),
        None => "an anonymous class".to_string(),
    }
}

impl MopError {
    /// Shorthand for a `TypeError` with the offending value and expected type
    pub fn type_error(datum: Value, expected: impl Into<String>) -> Self {
        MopError::TypeError {
            datum,
            expected: expected.into(),
        }
    }

    /// Error-kind tag for the evaluator's condition mapping
    pub fn kind(&self) -> &'static str {
        match self {
            MopError::TypeError { .. } => "type-error",
            MopError::NotFinalized { .. } => "not-finalized",
            MopError::DuplicateSlot { .. } => "duplicate-slot",
            MopError::CyclicSuperclass { .. } => "cyclic-superclass",
            MopError::InconsistentPrecedence { .. } => "inconsistent-precedence",
            MopError::SealedClass { .. } => "sealed-class",
            MopError::UnboundSlot { .. } => "unbound-slot",
            MopError::MissingSlot { .. } => "missing-slot",
            MopError::SlotIndexOutOfRange { .. } => "slot-index-out-of-range",
            MopError::LayoutTooLarge { .. } => "layout-too-large",
            MopError::HierarchyTooDeep { .. } => "hierarchy-too-deep",
            MopError::IncongruentLambdaList { .. } => "incongruent-lambda-list",
        }
    }
}
