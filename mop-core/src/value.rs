//! Runtime values
//!
//! Every value the surrounding runtime hands to this layer. The type-test
//! protocol (`type-of`, `class-of`, `typep`) and the printed representation
//! are defined for all of them, class objects included.

use crate::class::ClassHandle;
use crate::generic::GenericFunctionRef;
use crate::instance::Instance;
use crate::symbol::Symbol;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque reference to a compiled function.
///
/// The code representation belongs to the compiler; this layer only stores
/// and compares references.
#[derive(Clone)]
pub struct Function {
    name: Option<Symbol>,
    code: Arc<dyn Any + Send + Sync>,
}

impl Function {
    pub fn new(name: Option<Symbol>, code: Arc<dyn Any + Send + Sync>) -> Self {
        Self { name, code }
    }

    pub fn name(&self) -> Option<&Symbol> {
        self.name.as_ref()
    }

    /// Downcast the opaque code object
    pub fn code<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.code.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.code, &other.code)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#<FUNCTION {name}>"),
            None => f.write_str("#<FUNCTION>"),
        }
    }
}

/// A runtime value
#[derive(Clone)]
pub enum Value {
    Nil,
    Integer(i64),
    Float(f64),
    Str(Arc<str>),
    Symbol(Symbol),
    List(Arc<[Value]>),
    Function(Function),
    Class(ClassHandle),
    Instance(Instance),
    GenericFunction(GenericFunctionRef),
    /// Literal specializer: a method parameter dispatched on an `eql` value
    EqlSpecializer(Arc<Value>),
}

impl Value {
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    pub fn string(text: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(text.as_ref()))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        if items.is_empty() {
            Value::Nil
        } else {
            Value::List(Arc::from(items))
        }
    }

    pub fn eql_specializer(object: Value) -> Self {
        Value::EqlSpecializer(Arc::new(object))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassHandle> {
        match self {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// View a proper list as a slice; `NIL` is the empty list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::Nil => Some(&[]),
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// `eql` identity: immediates compare by value, heap objects by identity
    pub fn eql(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            (Value::GenericFunction(a), Value::GenericFunction(b)) => Arc::ptr_eq(a, b),
            (Value::EqlSpecializer(a), Value::EqlSpecializer(b)) => a.eql(b),
            _ => false,
        }
    }
}

/// Structural equality: strings and lists compare by content, objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::EqlSpecializer(a), Value::EqlSpecializer(b)) => a == b,
            _ => self.eql(other),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<ClassHandle> for Value {
    fn from(class: ClassHandle) -> Self {
        Value::Class(class)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

// ==================== 打印表示 ====================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("NIL"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(text) => write!(f, "{text:?}"),
            Value::Symbol(symbol) => write!(f, "{symbol}"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Function(function) => write!(f, "{function:?}"),
            Value::Class(class) => f.write_str(&class.describe()),
            Value::Instance(instance) => f.write_str(&instance.describe()),
            Value::GenericFunction(gf) => f.write_str(&gf.describe()),
            Value::EqlSpecializer(object) => write!(f, "#<EQL-SPECIALIZER {object}>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
