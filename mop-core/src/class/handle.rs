//! Stable class identity.
//!
//! A `ClassHandle` names one class for its whole lifetime. Its pointee, the
//! current generation, is swapped when a placeholder is resolved or the class
//! is redefined, so every holder of the handle observes the change.

use super::{describe, ClassKind, ClassMetaobject, ClassState, MetaclassRef, TypeSpec};
use crate::error::MopResult;
use crate::layout::Layout;
use crate::symbol::Symbol;
use crate::value::Value;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

struct ClassCell {
    id: u64,
    generation: AtomicU64,
    current: RwLock<Arc<dyn ClassMetaobject>>,
    subclasses: Mutex<Vec<Weak<ClassCell>>>,
}

/// Identity-preserving reference to a class object
#[derive(Clone)]
pub struct ClassHandle(Arc<ClassCell>);

impl ClassHandle {
    pub(crate) fn new(meta: Arc<dyn ClassMetaobject>) -> Self {
        Self(Arc::new(ClassCell {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            generation: AtomicU64::new(0),
            current: RwLock::new(meta),
            subclasses: Mutex::new(Vec::new()),
        }))
    }

    /// Process-unique id, stable across redefinition
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// The current generation. The snapshot stays valid after a concurrent
    /// redefinition; it just stops being current.
    pub fn snapshot(&self) -> Arc<dyn ClassMetaobject> {
        self.0.current.read().clone()
    }

    /// Swap in a new generation, returning the one it replaces
    pub(crate) fn replace(&self, meta: Arc<dyn ClassMetaobject>) -> Arc<dyn ClassMetaobject> {
        std::mem::replace(&mut *self.0.current.write(), meta)
    }

    /// Reserve the number of the next generation
    pub(crate) fn next_generation(&self) -> u64 {
        self.0.generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of generations built for this class so far
    pub fn generation(&self) -> u64 {
        self.0.generation.load(Ordering::Relaxed)
    }

    pub fn name(&self) -> Option<Symbol> {
        self.snapshot().name().cloned()
    }

    pub fn kind(&self) -> ClassKind {
        self.snapshot().kind()
    }

    pub fn state(&self) -> ClassState {
        self.snapshot().state()
    }

    pub fn is_finalized(&self) -> bool {
        self.state() == ClassState::Finalized
    }

    pub fn layout(&self) -> Option<Arc<Layout>> {
        self.snapshot().layout().cloned()
    }

    pub fn documentation(&self) -> Option<String> {
        self.snapshot().documentation().map(str::to_string)
    }

    /// `type-of` of the class object: the variant's tag
    pub fn type_of(&self) -> Symbol {
        Symbol::new(self.snapshot().type_tag())
    }

    /// `class-of` of the class object: its metaclass
    pub fn class_of(&self) -> ClassHandle {
        match self.snapshot().metaclass() {
            MetaclassRef::Itself => self.clone(),
            MetaclassRef::Class(class) => class.clone(),
        }
    }

    /// `typep` of the class object itself
    pub fn typep(&self, candidate: &TypeSpec) -> bool {
        self.snapshot().typep(self, candidate)
    }

    pub fn allocate_instance(&self) -> MopResult<Value> {
        self.snapshot().allocate_instance(self)
    }

    pub fn describe(&self) -> String {
        describe(&*self.snapshot())
    }

    pub fn direct_superclasses(&self) -> Vec<ClassHandle> {
        self.snapshot().direct_superclasses().to_vec()
    }

    pub fn direct_slots(&self) -> Vec<Symbol> {
        self.snapshot().direct_slots().to_vec()
    }

    /// Class precedence list, the class itself first.
    ///
    /// Before finalization this is a depth-first walk of the superclass graph,
    /// good enough for subtype tests but not for slot inheritance.
    pub fn precedence_list(&self) -> Vec<ClassHandle> {
        let meta = self.snapshot();
        if meta.state() == ClassState::Finalized {
            let mut list = Vec::with_capacity(meta.inherited_precedence().len() + 1);
            list.push(self.clone());
            list.extend(meta.inherited_precedence().iter().cloned());
            return list;
        }

        let mut seen = HashSet::new();
        let mut list = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(class) = stack.pop() {
            if !seen.insert(class.id()) {
                continue;
            }
            let supers = class.direct_superclasses();
            stack.extend(supers.into_iter().rev());
            list.push(class);
        }
        list
    }

    /// Reflexive subclass test
    pub fn is_subclass_of(&self, other: &ClassHandle) -> bool {
        self.precedence_list().iter().any(|c| c == other)
    }

    /// Live direct subclasses; dead links are pruned on the way
    pub fn direct_subclasses(&self) -> Vec<ClassHandle> {
        let mut links = self.0.subclasses.lock();
        links.retain(|weak| weak.strong_count() > 0);
        links
            .iter()
            .filter_map(Weak::upgrade)
            .map(ClassHandle)
            .collect()
    }

    pub(crate) fn add_direct_subclass(&self, subclass: &ClassHandle) {
        let mut links = self.0.subclasses.lock();
        let target = Arc::as_ptr(&subclass.0);
        if !links.iter().any(|weak| weak.as_ptr() == target) {
            links.push(Arc::downgrade(&subclass.0));
        }
    }

    pub(crate) fn remove_direct_subclass(&self, subclass: &ClassHandle) {
        let target = Arc::as_ptr(&subclass.0);
        self.0
            .subclasses
            .lock()
            .retain(|weak| weak.as_ptr() != target);
    }

    pub fn ptr_eq(&self, other: &ClassHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ClassHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ClassHandle {}

impl Hash for ClassHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
