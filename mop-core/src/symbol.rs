//! 符号（Symbol）
//!
//! The symbol/package system lives outside this layer; all the metaobject
//! layer needs is a cheap, clonable identifier compared by name.

use std::fmt;
use std::sync::Arc;

/// An identifier naming classes, slots, generic functions and type tags.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Keywords are written with a leading colon, e.g. `:before`.
    pub fn is_keyword(&self) -> bool {
        self.0.starts_with(':') && self.0.len() > 1
    }

    pub fn is(&self, name: &str) -> bool {
        &*self.0 == name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", &self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// Well-known names used by the kernel classes and the type-test protocol.
pub mod names {
    pub const T: &str = "T";
    pub const NIL: &str = "NIL";

    // 类元对象
    pub const STANDARD_OBJECT: &str = "STANDARD-OBJECT";
    pub const CLASS: &str = "CLASS";
    pub const STANDARD_CLASS: &str = "STANDARD-CLASS";
    pub const FORWARD_REFERENCED_CLASS: &str = "FORWARD-REFERENCED-CLASS";
    pub const BUILT_IN_CLASS: &str = "BUILT-IN-CLASS";

    // 方法与泛函
    pub const METHOD: &str = "METHOD";
    pub const STANDARD_METHOD: &str = "STANDARD-METHOD";
    pub const GENERIC_FUNCTION: &str = "GENERIC-FUNCTION";
    pub const STANDARD_GENERIC_FUNCTION: &str = "STANDARD-GENERIC-FUNCTION";
    pub const EQL_SPECIALIZER: &str = "EQL-SPECIALIZER";

    // 内置类型
    pub const NUMBER: &str = "NUMBER";
    pub const INTEGER: &str = "INTEGER";
    pub const FLOAT: &str = "FLOAT";
    pub const STRING: &str = "STRING";
    pub const SYMBOL: &str = "SYMBOL";
    pub const LIST: &str = "LIST";
    pub const CONS: &str = "CONS";
    pub const NULL: &str = "NULL";
    pub const FUNCTION: &str = "FUNCTION";
}
