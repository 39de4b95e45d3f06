//! Method objects
//!
//! A method is an instance of STANDARD-METHOD (or a subclass) carrying seven
//! attributes. Attributes are read and written through the named slot
//! protocol, so a method whose class is later redefined still migrates.

use crate::class::ClassHandle;
use crate::error::{MopError, MopResult};
use crate::generic::GenericFunctionRef;
use crate::instance::Instance;
use crate::symbol::{names, Symbol};
use crate::value::{Function, Value};
use std::fmt;

/// Slot names of the method metaclass layout, in storage order
pub const METHOD_SLOT_NAMES: [&str; 7] = [
    "GENERIC-FUNCTION",
    "LAMBDA-LIST",
    "SPECIALIZERS",
    "QUALIFIERS",
    "FUNCTION",
    "FAST-FUNCTION",
    "DOCUMENTATION",
];

/// One attribute of a method object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodSlot {
    GenericFunction,
    LambdaList,
    Specializers,
    Qualifiers,
    Function,
    FastFunction,
    Documentation,
}

impl MethodSlot {
    pub const ALL: [MethodSlot; 7] = [
        MethodSlot::GenericFunction,
        MethodSlot::LambdaList,
        MethodSlot::Specializers,
        MethodSlot::Qualifiers,
        MethodSlot::Function,
        MethodSlot::FastFunction,
        MethodSlot::Documentation,
    ];

    /// Position in the fixed layout
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        METHOD_SLOT_NAMES[self.index()]
    }

    pub fn symbol(self) -> Symbol {
        Symbol::new(self.name())
    }
}

/// What a method parameter is specialized on
#[derive(Debug, Clone)]
pub enum Specializer {
    Class(ClassHandle),
    Eql(Value),
}

impl Specializer {
    pub fn to_value(&self) -> Value {
        match self {
            Specializer::Class(class) => Value::Class(class.clone()),
            Specializer::Eql(object) => Value::eql_specializer(object.clone()),
        }
    }

    pub fn from_value(value: &Value) -> MopResult<Self> {
        match value {
            Value::Class(class) => Ok(Specializer::Class(class.clone())),
            Value::EqlSpecializer(object) => Ok(Specializer::Eql((**object).clone())),
            other => Err(MopError::type_error(
                other.clone(),
                "(OR CLASS EQL-SPECIALIZER)",
            )),
        }
    }

    /// Same class identity, or `eql` objects
    pub fn same_as(&self, other: &Specializer) -> bool {
        match (self, other) {
            (Specializer::Class(a), Specializer::Class(b)) => a == b,
            (Specializer::Eql(a), Specializer::Eql(b)) => a.eql(b),
            _ => false,
        }
    }
}

/// Typed view of a method instance
#[derive(Clone)]
pub struct MethodObject(Instance);

impl MethodObject {
    pub(crate) fn from_instance(instance: Instance) -> Self {
        Self(instance)
    }

    /// View `value` as a method; it must be an instance of STANDARD-METHOD
    pub fn from_value(value: &Value) -> MopResult<Self> {
        match value {
            Value::Instance(instance)
                if instance
                    .class()
                    .precedence_list()
                    .iter()
                    .any(|c| c.name().is_some_and(|n| n.is(names::STANDARD_METHOD))) =>
            {
                Ok(Self(instance.clone()))
            }
            other => Err(MopError::type_error(other.clone(), names::STANDARD_METHOD)),
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Instance(self.0)
    }

    pub fn ptr_eq(&self, other: &MethodObject) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Raw attribute; `None` while unbound
    pub fn slot(&self, slot: MethodSlot) -> MopResult<Option<Value>> {
        let name = slot.symbol();
        if self.0.slot_boundp(&name)? {
            self.0.slot_value(&name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn set_slot(&self, slot: MethodSlot, value: Value) -> MopResult<()> {
        self.0.set_slot_value(&slot.symbol(), value)
    }

    /// Every attribute has been given a value
    pub fn is_initialized(&self) -> MopResult<bool> {
        for slot in MethodSlot::ALL {
            if !self.0.slot_boundp(&slot.symbol())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn bound(&self, slot: MethodSlot) -> MopResult<Value> {
        self.0.slot_value(&slot.symbol())
    }

    pub fn generic_function(&self) -> MopResult<Option<GenericFunctionRef>> {
        match self.bound(MethodSlot::GenericFunction)? {
            Value::GenericFunction(gf) => Ok(Some(gf)),
            Value::Nil => Ok(None),
            other => Err(MopError::type_error(other, "(OR GENERIC-FUNCTION NULL)")),
        }
    }

    pub fn lambda_list(&self) -> MopResult<Vec<Symbol>> {
        symbol_list(self.bound(MethodSlot::LambdaList)?)
    }

    pub fn specializers(&self) -> MopResult<Vec<Specializer>> {
        let value = self.bound(MethodSlot::Specializers)?;
        let items = value
            .as_list()
            .ok_or_else(|| MopError::type_error(value.clone(), "LIST"))?;
        items.iter().map(Specializer::from_value).collect()
    }

    pub fn qualifiers(&self) -> MopResult<Vec<Symbol>> {
        symbol_list(self.bound(MethodSlot::Qualifiers)?)
    }

    pub fn function(&self) -> MopResult<Function> {
        match self.bound(MethodSlot::Function)? {
            Value::Function(function) => Ok(function),
            other => Err(MopError::type_error(other, names::FUNCTION)),
        }
    }

    pub fn fast_function(&self) -> MopResult<Option<Function>> {
        match self.bound(MethodSlot::FastFunction)? {
            Value::Function(function) => Ok(Some(function)),
            Value::Nil => Ok(None),
            other => Err(MopError::type_error(other, "(OR FUNCTION NULL)")),
        }
    }

    pub fn documentation(&self) -> MopResult<Option<String>> {
        match self.bound(MethodSlot::Documentation)? {
            Value::Str(text) => Ok(Some(text.to_string())),
            Value::Nil => Ok(None),
            other => Err(MopError::type_error(other, "(OR STRING NULL)")),
        }
    }
}

fn symbol_list(value: Value) -> MopResult<Vec<Symbol>> {
    let items = value
        .as_list()
        .ok_or_else(|| MopError::type_error(value.clone(), "LIST"))?;
    items
        .iter()
        .map(|item| {
            item.as_symbol()
                .cloned()
                .ok_or_else(|| MopError::type_error(item.clone(), names::SYMBOL))
        })
        .collect()
}

impl fmt::Debug for MethodObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.describe())
    }
}
