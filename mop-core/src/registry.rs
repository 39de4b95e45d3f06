//! 类注册表（Class registry）
//!
//! Maps class names to class handles. All mutation is serialized by one
//! definition lock; lookups only take a brief read lock on the name table.
//! The kernel classes are created and finalized when the registry is built.

use crate::class::{
    check_class_name, BuiltInClass, ClassHandle, ClassKind, ClassMetaobject, ClassState,
    ForwardReferencedClass, MetaclassRef, StandardClass, StandardMethodMetaclass,
};
use crate::error::{MopError, MopResult};
use crate::layout::Layout;
use crate::symbol::{names, Symbol};
use crate::value::Value;
use mop_config::{LimitConfig, TARGET_REGISTRY};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Handles of the classes every registry starts with
#[derive(Debug, Clone)]
pub struct Kernel {
    pub t: ClassHandle,
    pub standard_object: ClassHandle,
    pub class: ClassHandle,
    pub standard_class: ClassHandle,
    pub forward_referenced_class: ClassHandle,
    pub built_in_class: ClassHandle,
    pub method: ClassHandle,
    pub standard_method: ClassHandle,
    pub generic_function: ClassHandle,
    pub standard_generic_function: ClassHandle,
    pub eql_specializer: ClassHandle,
    pub number: ClassHandle,
    pub integer: ClassHandle,
    pub float: ClassHandle,
    pub string: ClassHandle,
    pub symbol: ClassHandle,
    pub list: ClassHandle,
    pub cons: ClassHandle,
    pub null: ClassHandle,
    pub function: ClassHandle,
}

impl Kernel {
    fn bootstrap() -> Kernel {
        // STANDARD-CLASS and BUILT-IN-CLASS are needed as metaclasses before
        // their own superclasses exist; their cells get real content last.
        let standard_class = ClassHandle::new(Arc::new(StandardClass::new(
            Some(Symbol::new(names::STANDARD_CLASS)),
            MetaclassRef::Itself,
            Vec::new(),
            Vec::new(),
        )));
        let built_in_class = ClassHandle::new(Arc::new(StandardClass::new(
            Some(Symbol::new(names::BUILT_IN_CLASS)),
            MetaclassRef::Class(standard_class.clone()),
            Vec::new(),
            Vec::new(),
        )));

        let sc = &standard_class;
        let bic = &built_in_class;

        let t = built_in(names::T, bic, &[]);
        let standard_object = standard(names::STANDARD_OBJECT, sc, &[&t]);
        let class = standard(names::CLASS, sc, &[&standard_object]);

        standard_class.replace(Arc::new(StandardClass::kernel(
            names::STANDARD_CLASS,
            MetaclassRef::Itself,
            vec![class.clone()],
            kernel_precedence(&[&class]),
            Layout::empty(Some(Symbol::new(names::STANDARD_CLASS))),
        )));
        class.add_direct_subclass(&standard_class);
        built_in_class.replace(Arc::new(StandardClass::kernel(
            names::BUILT_IN_CLASS,
            MetaclassRef::Class(standard_class.clone()),
            vec![class.clone()],
            kernel_precedence(&[&class]),
            Layout::empty(Some(Symbol::new(names::BUILT_IN_CLASS))),
        )));
        class.add_direct_subclass(&built_in_class);

        let forward_referenced_class = standard(names::FORWARD_REFERENCED_CLASS, sc, &[&class]);

        let method = standard(names::METHOD, sc, &[&standard_object]);
        let standard_method = ClassHandle::new(Arc::new(StandardMethodMetaclass::new(
            standard_class.clone(),
            vec![method.clone()],
            kernel_precedence(&[&method]),
        )));
        method.add_direct_subclass(&standard_method);

        let generic_function = standard(names::GENERIC_FUNCTION, sc, &[&standard_object]);
        let standard_generic_function =
            standard(names::STANDARD_GENERIC_FUNCTION, sc, &[&generic_function]);
        let eql_specializer = standard(names::EQL_SPECIALIZER, sc, &[&standard_object]);

        let number = built_in(names::NUMBER, bic, &[&t]);
        let integer = built_in(names::INTEGER, bic, &[&number]);
        let float = built_in(names::FLOAT, bic, &[&number]);
        let string = built_in(names::STRING, bic, &[&t]);
        let symbol = built_in(names::SYMBOL, bic, &[&t]);
        let list = built_in(names::LIST, bic, &[&t]);
        let cons = built_in(names::CONS, bic, &[&list]);
        let null = built_in(names::NULL, bic, &[&symbol, &list]);
        let function = built_in(names::FUNCTION, bic, &[&t]);

        Kernel {
            t,
            standard_object,
            class,
            standard_class,
            forward_referenced_class,
            built_in_class,
            method,
            standard_method,
            generic_function,
            standard_generic_function,
            eql_specializer,
            number,
            integer,
            float,
            string,
            symbol,
            list,
            cons,
            null,
            function,
        }
    }

    /// Every kernel class
    pub fn all(&self) -> [&ClassHandle; 20] {
        [
            &self.t,
            &self.standard_object,
            &self.class,
            &self.standard_class,
            &self.forward_referenced_class,
            &self.built_in_class,
            &self.method,
            &self.standard_method,
            &self.generic_function,
            &self.standard_generic_function,
            &self.eql_specializer,
            &self.number,
            &self.integer,
            &self.float,
            &self.string,
            &self.symbol,
            &self.list,
            &self.cons,
            &self.null,
            &self.function,
        ]
    }
}

/// Precedence of a kernel class from its superclasses' lists: concatenate,
/// keeping the last occurrence of each class. Matches C3 on the kernel graph.
fn kernel_precedence(supers: &[&ClassHandle]) -> Vec<ClassHandle> {
    let all: Vec<ClassHandle> = supers.iter().flat_map(|c| c.precedence_list()).collect();
    let mut seen = HashSet::new();
    let mut list: Vec<ClassHandle> = all
        .into_iter()
        .rev()
        .filter(|c| seen.insert(c.id()))
        .collect();
    list.reverse();
    list
}

fn link(class: &ClassHandle, supers: &[&ClassHandle]) {
    for sup in supers {
        sup.add_direct_subclass(class);
    }
}

fn standard(name: &str, metaclass: &ClassHandle, supers: &[&ClassHandle]) -> ClassHandle {
    let class = ClassHandle::new(Arc::new(StandardClass::kernel(
        name,
        MetaclassRef::Class(metaclass.clone()),
        supers.iter().map(|c| (*c).clone()).collect(),
        kernel_precedence(supers),
        Layout::empty(Some(Symbol::new(name))),
    )));
    link(&class, supers);
    class
}

fn built_in(name: &str, metaclass: &ClassHandle, supers: &[&ClassHandle]) -> ClassHandle {
    let class = ClassHandle::new(Arc::new(BuiltInClass::new(
        name,
        metaclass.clone(),
        supers.iter().map(|c| (*c).clone()).collect(),
        kernel_precedence(supers),
    )));
    link(&class, supers);
    class
}

/// What a compiled class definition asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: Symbol,
    /// Superclass names; empty means STANDARD-OBJECT
    pub superclasses: Vec<Symbol>,
    pub slots: Vec<Symbol>,
    pub documentation: Option<String>,
}

impl ClassDefinition {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Symbol::new(name),
            superclasses: Vec::new(),
            slots: Vec::new(),
            documentation: None,
        }
    }

    pub fn with_superclasses<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.superclasses = names.into_iter().map(Symbol::new).collect();
        self
    }

    pub fn with_slots<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.slots = names.into_iter().map(Symbol::new).collect();
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Name → class table shared by every thread of one runtime
pub struct ClassRegistry {
    entries: RwLock<HashMap<Symbol, ClassHandle>>,
    define_lock: Mutex<()>,
    kernel: Kernel,
    limits: LimitConfig,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::with_limits(LimitConfig::default())
    }

    pub fn with_limits(limits: LimitConfig) -> Self {
        let kernel = Kernel::bootstrap();
        let entries = kernel
            .all()
            .into_iter()
            .filter_map(|class| class.name().map(|name| (name, class.clone())))
            .collect::<HashMap<_, _>>();
        tracing::debug!(
            target: TARGET_REGISTRY,
            classes = entries.len(),
            "kernel classes installed"
        );
        Self {
            entries: RwLock::new(entries),
            define_lock: Mutex::new(()),
            kernel,
            limits,
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn limits(&self) -> &LimitConfig {
        &self.limits
    }

    pub fn lookup(&self, name: &Symbol) -> Option<ClassHandle> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &Symbol) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Bind `name` to `class`, returning the previous binding.
    /// Kernel classes cannot be displaced.
    pub fn register(&self, name: Symbol, class: ClassHandle) -> MopResult<Option<ClassHandle>> {
        check_class_name(&name)?;
        let _guard = self.define_lock.lock();
        self.check_not_sealed(&name)?;
        tracing::debug!(target: TARGET_REGISTRY, %name, class = %class.describe(), "class registered");
        Ok(self.entries.write().insert(name, class))
    }

    /// Evict the binding of `name`. Kernel classes cannot be evicted.
    pub fn remove(&self, name: &Symbol) -> MopResult<Option<ClassHandle>> {
        let _guard = self.define_lock.lock();
        self.check_not_sealed(name)?;
        let removed = self.entries.write().remove(name);
        if removed.is_some() {
            tracing::debug!(target: TARGET_REGISTRY, %name, "class removed");
        }
        Ok(removed)
    }

    fn check_not_sealed(&self, name: &Symbol) -> MopResult<()> {
        match self.lookup(name) {
            Some(existing) if existing.snapshot().is_sealed() => {
                Err(MopError::SealedClass { name: name.clone() })
            }
            _ => Ok(()),
        }
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<Symbol> {
        let mut names: Vec<Symbol> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The class named `name`, creating a placeholder if there is none.
    /// Concurrent callers for the same missing name get the same handle.
    pub fn resolve_or_placeholder(&self, name: &Symbol) -> MopResult<ClassHandle> {
        check_class_name(name)?;
        if let Some(class) = self.lookup(name) {
            return Ok(class);
        }
        let _guard = self.define_lock.lock();
        Ok(self.resolve_locked(name))
    }

    fn resolve_locked(&self, name: &Symbol) -> ClassHandle {
        if let Some(class) = self.lookup(name) {
            return class;
        }
        let placeholder = ClassHandle::new(self.forward_reference(name));
        self.entries.write().insert(name.clone(), placeholder.clone());
        tracing::debug!(target: TARGET_REGISTRY, %name, "placeholder created");
        placeholder
    }

    fn forward_reference(&self, name: &Symbol) -> Arc<dyn ClassMetaobject> {
        Arc::new(ForwardReferencedClass::new(
            name.clone(),
            self.kernel.forward_referenced_class.clone(),
        ))
    }

    /// Install a fresh placeholder under `name`.
    ///
    /// A name already bound to a placeholder keeps its handle; the new
    /// placeholder object is swapped in behind it. A name bound to a real
    /// class is rebound to a new handle, and holders of the old handle keep
    /// the old class. Kernel classes cannot be displaced.
    pub fn install_placeholder(&self, name: Symbol) -> MopResult<ClassHandle> {
        check_class_name(&name)?;
        let _guard = self.define_lock.lock();
        let placeholder = self.forward_reference(&name);
        match self.lookup(&name) {
            Some(existing) if existing.state() == ClassState::Placeholder => {
                existing.replace(placeholder);
                tracing::debug!(target: TARGET_REGISTRY, %name, "placeholder refreshed");
                Ok(existing)
            }
            Some(existing) if existing.snapshot().is_sealed() => Err(MopError::SealedClass { name }),
            Some(existing) => {
                let fresh = ClassHandle::new(placeholder);
                self.entries.write().insert(name.clone(), fresh.clone());
                tracing::warn!(
                    target: TARGET_REGISTRY,
                    %name,
                    displaced = %existing.describe(),
                    "class displaced by placeholder"
                );
                Ok(fresh)
            }
            None => {
                let fresh = ClassHandle::new(placeholder);
                self.entries.write().insert(name.clone(), fresh.clone());
                tracing::debug!(target: TARGET_REGISTRY, %name, "placeholder created");
                Ok(fresh)
            }
        }
    }

    /// Define or redefine a standard class.
    ///
    /// Missing superclasses become placeholders. When every superclass is
    /// finalized the new generation is finalized before it is published, so
    /// readers never observe a half-built class. Subclasses are then
    /// re-finalized against the new generation.
    pub fn define_class(&self, definition: &ClassDefinition) -> MopResult<ClassHandle> {
        let name = &definition.name;
        check_class_name(name)?;
        for sup in &definition.superclasses {
            check_class_name(sup)?;
        }

        let _guard = self.define_lock.lock();
        let existing = self.lookup(name);
        if let Some(class) = &existing {
            if class.snapshot().is_sealed() {
                return Err(MopError::SealedClass { name: name.clone() });
            }
        }

        // Own slots must be distinct even if finalization has to wait
        Layout::build_for(Some(name), &definition.slots, &[])?;
        self.check_superclasses(definition, existing.as_ref())?;

        let supers: Vec<ClassHandle> = if definition.superclasses.is_empty() {
            vec![self.kernel.standard_object.clone()]
        } else {
            definition
                .superclasses
                .iter()
                .map(|sup| self.resolve_locked(sup))
                .collect()
        };

        let generation = StandardClass::new(
            Some(name.clone()),
            MetaclassRef::Class(self.kernel.standard_class.clone()),
            supers.clone(),
            definition.slots.clone(),
        )
        .with_documentation(definition.documentation.clone());

        let (class, is_new) = match existing {
            Some(class) => (class, false),
            None => (ClassHandle::new(Arc::new(generation.clone())), true),
        };

        let next: Arc<dyn ClassMetaobject> = if supers.iter().all(ClassHandle::is_finalized) {
            Arc::new(generation.finalized(&class, class.next_generation(), &self.limits)?)
        } else {
            Arc::new(generation)
        };
        let finalized = next.state() == ClassState::Finalized;

        let previous = class.replace(next);
        for old in previous.direct_superclasses() {
            old.remove_direct_subclass(&class);
        }
        for sup in &supers {
            sup.add_direct_subclass(&class);
        }
        if is_new {
            self.entries.write().insert(name.clone(), class.clone());
        }

        tracing::info!(
            target: TARGET_REGISTRY,
            %name,
            generation = class.generation(),
            finalized,
            redefined = !is_new && previous.kind() == ClassKind::Standard,
            "class defined"
        );

        self.cascade(&class);
        Ok(class)
    }

    fn check_superclasses(
        &self,
        definition: &ClassDefinition,
        existing: Option<&ClassHandle>,
    ) -> MopResult<()> {
        let name = &definition.name;
        let mut seen = HashSet::new();
        for sup in &definition.superclasses {
            if sup == name {
                return Err(MopError::CyclicSuperclass {
                    class: name.clone(),
                    superclass: sup.clone(),
                });
            }
            if !seen.insert(sup) {
                return Err(MopError::InconsistentPrecedence {
                    class: name.to_string(),
                });
            }
            let Some(handle) = self.lookup(sup) else {
                continue;
            };
            if handle.kind() == ClassKind::BuiltIn && handle != self.kernel.t {
                return Err(MopError::type_error(
                    Value::Class(handle),
                    "(NOT BUILT-IN-CLASS)",
                ));
            }
            if let Some(class) = existing {
                if handle.is_subclass_of(class) {
                    return Err(MopError::CyclicSuperclass {
                        class: name.clone(),
                        superclass: sup.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Re-finalize every descendant of `root`, superclasses before subclasses
    fn cascade(&self, root: &ClassHandle) {
        let mut affected = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = root.direct_subclasses();
        while let Some(class) = queue.pop() {
            if seen.insert(class.id()) {
                queue.extend(class.direct_subclasses());
                affected.push(class);
            }
        }

        let mut done = HashSet::from([root.id()]);
        while !affected.is_empty() {
            let ready = affected.iter().position(|class| {
                class
                    .direct_superclasses()
                    .iter()
                    .all(|sup| done.contains(&sup.id()) || !seen.contains(&sup.id()))
            });
            let Some(index) = ready else {
                break;
            };
            let class = affected.remove(index);
            self.refinalize(&class);
            done.insert(class.id());
        }
    }

    fn refinalize(&self, class: &ClassHandle) {
        let meta = class.snapshot();
        if meta.is_sealed() {
            return;
        }
        let ready = meta
            .direct_superclasses()
            .iter()
            .all(ClassHandle::is_finalized);
        let next = if ready {
            match meta.finalize(class, class.next_generation(), &self.limits) {
                Ok(next) => next,
                Err(err) => {
                    tracing::warn!(
                        target: TARGET_REGISTRY,
                        class = %class.describe(),
                        error = %err,
                        "subclass left unfinalized"
                    );
                    meta.unfinalized()
                }
            }
        } else {
            meta.unfinalized()
        };
        let finalized = next.state() == ClassState::Finalized;
        class.replace(next);
        tracing::debug!(
            target: TARGET_REGISTRY,
            class = %class.describe(),
            finalized,
            "subclass updated"
        );
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    #[test]
    fn test_kernel_installed() {
        let registry = ClassRegistry::new();
        for name in [names::T, names::STANDARD_CLASS, names::STANDARD_METHOD, names::NULL] {
            assert!(registry.contains(&sym(name)), "{name} missing");
        }
        assert_eq!(registry.len(), 20);
        let kernel = registry.kernel();
        assert!(kernel.standard_class.class_of().ptr_eq(&kernel.standard_class));
        assert_eq!(kernel.t.class_of(), kernel.built_in_class);
        assert!(kernel.all().iter().all(|c| c.is_finalized()));
    }

    #[test]
    fn test_kernel_precedence() {
        let registry = ClassRegistry::new();
        let k = registry.kernel();
        assert_eq!(
            k.standard_class.precedence_list(),
            vec![
                k.standard_class.clone(),
                k.class.clone(),
                k.standard_object.clone(),
                k.t.clone()
            ]
        );
        assert_eq!(
            k.null.precedence_list(),
            vec![k.null.clone(), k.symbol.clone(), k.list.clone(), k.t.clone()]
        );
    }

    #[test]
    fn test_resolve_or_placeholder_is_stable() {
        let registry = ClassRegistry::new();
        let a = registry.resolve_or_placeholder(&sym("FOO")).unwrap();
        let b = registry.resolve_or_placeholder(&sym("FOO")).unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.state(), ClassState::Placeholder);
    }

    #[test]
    fn test_define_resolves_placeholder_in_place() {
        let registry = ClassRegistry::new();
        let early = registry.resolve_or_placeholder(&sym("POINT")).unwrap();
        let defined = registry
            .define_class(&ClassDefinition::new("POINT").with_slots(["X", "Y"]))
            .unwrap();
        assert!(early.ptr_eq(&defined));
        assert!(early.is_finalized());
        assert_eq!(early.layout().unwrap().len(), 2);
    }

    #[test]
    fn test_subclass_waits_for_superclass() {
        let registry = ClassRegistry::new();
        let child = registry
            .define_class(&ClassDefinition::new("CHILD").with_superclasses(["PARENT"]).with_slots(["B"]))
            .unwrap();
        assert_eq!(child.state(), ClassState::Unfinalized);
        assert_eq!(
            registry.lookup(&sym("PARENT")).unwrap().state(),
            ClassState::Placeholder
        );

        registry
            .define_class(&ClassDefinition::new("PARENT").with_slots(["A"]))
            .unwrap();
        assert!(child.is_finalized());
        let layout = child.layout().unwrap();
        assert_eq!(layout.slot_names(), &[sym("A"), sym("B")]);
    }

    #[test]
    fn test_sealed_kernel_class() {
        let registry = ClassRegistry::new();
        let err = registry
            .define_class(&ClassDefinition::new("INTEGER"))
            .unwrap_err();
        assert_eq!(err.kind(), "sealed-class");
        let err = registry.install_placeholder(sym("STANDARD-CLASS")).unwrap_err();
        assert_eq!(err.kind(), "sealed-class");
    }

    #[test]
    fn test_invalid_class_names_rejected() {
        let registry = ClassRegistry::new();
        let before = registry.names();

        for bad in ["NIL", ""] {
            let err = registry
                .define_class(&ClassDefinition::new(bad))
                .unwrap_err();
            assert_eq!(err.kind(), "type-error", "defining {bad:?}");

            let err = registry
                .define_class(&ClassDefinition::new("KID").with_superclasses([bad]))
                .unwrap_err();
            assert_eq!(err.kind(), "type-error", "superclass {bad:?}");

            let err = registry.resolve_or_placeholder(&sym(bad)).unwrap_err();
            assert_eq!(err.kind(), "type-error");
            let err = registry.install_placeholder(sym(bad)).unwrap_err();
            assert_eq!(err.kind(), "type-error");
        }

        assert_eq!(registry.names(), before);
        assert!(registry.lookup(&sym("KID")).is_none());
    }

    #[test]
    fn test_register_and_remove() {
        let registry = ClassRegistry::new();
        let first = registry
            .define_class(&ClassDefinition::new("SHAPE"))
            .unwrap();
        let other = registry.resolve_or_placeholder(&sym("OTHER")).unwrap();

        let previous = registry.register(sym("SHAPE"), other.clone()).unwrap();
        assert!(previous.unwrap().ptr_eq(&first));
        assert!(registry.lookup(&sym("SHAPE")).unwrap().ptr_eq(&other));

        assert!(registry.register(sym("FRESH"), first.clone()).unwrap().is_none());
        assert!(registry.lookup(&sym("FRESH")).unwrap().ptr_eq(&first));

        let removed = registry.remove(&sym("FRESH")).unwrap();
        assert!(removed.unwrap().ptr_eq(&first));
        assert!(registry.lookup(&sym("FRESH")).is_none());
        assert!(registry.remove(&sym("FRESH")).unwrap().is_none());
    }

    #[test]
    fn test_register_cannot_displace_kernel() {
        let registry = ClassRegistry::new();
        let foo = registry.resolve_or_placeholder(&sym("FOO")).unwrap();
        let err = registry.register(sym(names::T), foo).unwrap_err();
        assert_eq!(err.kind(), "sealed-class");
        let err = registry.remove(&sym(names::STANDARD_CLASS)).unwrap_err();
        assert_eq!(err.kind(), "sealed-class");

        let t = registry.lookup(&sym(names::T)).unwrap();
        assert!(t.ptr_eq(&registry.kernel().t));
        assert_eq!(registry.len(), 21);
    }

    #[test]
    fn test_cycle_rejected() {
        let registry = ClassRegistry::new();
        registry
            .define_class(&ClassDefinition::new("B").with_superclasses(["A"]))
            .unwrap();
        let err = registry
            .define_class(&ClassDefinition::new("A").with_superclasses(["B"]))
            .unwrap_err();
        assert_eq!(err.kind(), "cyclic-superclass");

        let err = registry
            .define_class(&ClassDefinition::new("SELF").with_superclasses(["SELF"]))
            .unwrap_err();
        assert_eq!(err.kind(), "cyclic-superclass");
    }

    #[test]
    fn test_builtin_superclass_rejected() {
        let registry = ClassRegistry::new();
        let err = registry
            .define_class(&ClassDefinition::new("MY-INT").with_superclasses(["INTEGER"]))
            .unwrap_err();
        assert_eq!(err.kind(), "type-error");
        assert!(!registry.contains(&sym("MY-INT")));
    }

    #[test]
    fn test_duplicate_own_slot_rejected_early() {
        let registry = ClassRegistry::new();
        let err = registry
            .define_class(&ClassDefinition::new("P").with_slots(["X", "X"]))
            .unwrap_err();
        assert_eq!(err.kind(), "duplicate-slot");
        assert!(!registry.contains(&sym("P")));
    }
}
