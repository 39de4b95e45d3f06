//! Runtime context: the class registry plus the generic function table.
//!
//! One `Runtime` is shared by every evaluator thread; all entry points take
//! `&self`.

use crate::class::{ClassHandle, ForwardReferencedClass, TypeSpec};
use crate::error::{MopError, MopResult};
use crate::generic::{required_count, GenericFunction, GenericFunctionRef};
use crate::instance::Instance;
use crate::method::{MethodObject, MethodSlot, Specializer};
use crate::protocol;
use crate::registry::{ClassDefinition, ClassRegistry, Kernel};
use crate::symbol::Symbol;
use crate::value::{Function, Value};
use mop_config::{LimitConfig, TARGET_METHOD};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Everything needed to build one method object
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub lambda_list: Vec<Symbol>,
    pub specializers: Vec<Specializer>,
    pub qualifiers: Vec<Symbol>,
    pub function: Function,
    pub fast_function: Option<Function>,
    pub documentation: Option<String>,
}

impl MethodSpec {
    pub fn new(lambda_list: Vec<Symbol>, specializers: Vec<Specializer>, function: Function) -> Self {
        Self {
            lambda_list,
            specializers,
            qualifiers: Vec::new(),
            function,
            fast_function: None,
            documentation: None,
        }
    }

    pub fn with_qualifiers(mut self, qualifiers: Vec<Symbol>) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    pub fn with_fast_function(mut self, fast_function: Function) -> Self {
        self.fast_function = Some(fast_function);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

pub struct Runtime {
    registry: ClassRegistry,
    generic_functions: RwLock<HashMap<Symbol, GenericFunctionRef>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_limits(LimitConfig::default())
    }

    pub fn with_limits(limits: LimitConfig) -> Self {
        Self {
            registry: ClassRegistry::with_limits(limits),
            generic_functions: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn kernel(&self) -> &Kernel {
        self.registry.kernel()
    }

    // ==================== 类 ====================

    /// `make-forward-referenced-class`
    pub fn make_forward_referenced_class(&self, name: &Value) -> MopResult<ClassHandle> {
        ForwardReferencedClass::construct(&self.registry, name)
    }

    /// `ensure-class`: define or redefine
    pub fn ensure_class(&self, definition: &ClassDefinition) -> MopResult<ClassHandle> {
        self.registry.define_class(definition)
    }

    /// `find-class`
    pub fn find_class(&self, name: &Symbol) -> Option<ClassHandle> {
        self.registry.lookup(name)
    }

    /// The class named `name`, or a placeholder standing in for it
    pub fn class_reference(&self, name: &Symbol) -> MopResult<ClassHandle> {
        self.registry.resolve_or_placeholder(name)
    }

    pub fn allocate_instance(&self, class: &ClassHandle) -> MopResult<Value> {
        class.allocate_instance()
    }

    /// Allocate, then fill slots by name
    pub fn make_instance(
        &self,
        class: &ClassHandle,
        initargs: &[(Symbol, Value)],
    ) -> MopResult<Instance> {
        let value = class.allocate_instance()?;
        let instance = value
            .as_instance()
            .cloned()
            .ok_or_else(|| MopError::type_error(value.clone(), "STANDARD-OBJECT"))?;
        for (slot, initial) in initargs {
            instance.set_slot_value(slot, initial.clone())?;
        }
        Ok(instance)
    }

    // ==================== 类型协议 ====================

    pub fn type_of(&self, value: &Value) -> Symbol {
        protocol::type_of(value)
    }

    pub fn class_of(&self, value: &Value) -> ClassHandle {
        protocol::class_of(self.kernel(), value)
    }

    /// `typep` with a type designator given as a value
    pub fn typep(&self, value: &Value, designator: &Value) -> MopResult<bool> {
        let candidate = TypeSpec::from_value(designator)?;
        Ok(protocol::typep(self.kernel(), value, &candidate))
    }

    pub fn print(&self, value: &Value) -> String {
        protocol::print(value)
    }

    // ==================== 泛函与方法 ====================

    /// Find or create the generic function `name`.
    ///
    /// An existing function with a different number of required parameters
    /// is replaced only while it has no methods.
    pub fn ensure_generic_function(
        &self,
        name: Symbol,
        lambda_list: Vec<Symbol>,
    ) -> MopResult<GenericFunctionRef> {
        self.ensure_documented_generic_function(name, lambda_list, None)
    }

    /// `ensure_generic_function` carrying a docstring for a newly created function
    pub fn ensure_documented_generic_function(
        &self,
        name: Symbol,
        lambda_list: Vec<Symbol>,
        documentation: Option<String>,
    ) -> MopResult<GenericFunctionRef> {
        let mut table = self.generic_functions.write();
        if let Some(existing) = table.get(&name) {
            let expected = existing.required_count();
            let actual = required_count(&lambda_list);
            if expected == actual {
                return Ok(existing.clone());
            }
            if existing.method_count() > 0 {
                return Err(MopError::IncongruentLambdaList {
                    generic_function: name,
                    expected,
                    actual,
                });
            }
        }
        let gf = GenericFunction::with_documentation(name.clone(), lambda_list, documentation);
        table.insert(name.clone(), gf.clone());
        tracing::debug!(target: TARGET_METHOD, %name, "generic function created");
        Ok(gf)
    }

    pub fn find_generic_function(&self, name: &Symbol) -> Option<GenericFunctionRef> {
        self.generic_functions.read().get(name).cloned()
    }

    /// Build a method object through the method metaclass and add it to `gf`.
    ///
    /// The method is allocated with every attribute unbound, then each
    /// attribute is written through the named slot protocol.
    pub fn install_method(
        &self,
        gf: &GenericFunctionRef,
        spec: MethodSpec,
    ) -> MopResult<MethodObject> {
        let allocated = self.kernel().standard_method.allocate_instance()?;
        let method = MethodObject::from_value(&allocated)?;

        method.set_slot(MethodSlot::GenericFunction, Value::GenericFunction(gf.clone()))?;
        method.set_slot(
            MethodSlot::LambdaList,
            Value::list(spec.lambda_list.into_iter().map(Value::Symbol)),
        )?;
        method.set_slot(
            MethodSlot::Specializers,
            Value::list(spec.specializers.iter().map(Specializer::to_value)),
        )?;
        method.set_slot(
            MethodSlot::Qualifiers,
            Value::list(spec.qualifiers.into_iter().map(Value::Symbol)),
        )?;
        method.set_slot(MethodSlot::Function, Value::Function(spec.function))?;
        method.set_slot(
            MethodSlot::FastFunction,
            spec.fast_function.map(Value::Function).unwrap_or(Value::Nil),
        )?;
        method.set_slot(
            MethodSlot::Documentation,
            spec.documentation.map(Value::string).unwrap_or(Value::Nil),
        )?;

        gf.add_method(method.clone())?;
        Ok(method)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
