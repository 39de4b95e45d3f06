//! 实例存储（Instances）
//!
//! An instance is a vector of slot cells laid out by the layout of its class
//! at allocation time. Positional access always uses that layout. Named
//! access first brings an obsolete instance up to the class's current layout.

use crate::class::ClassHandle;
use crate::error::{MopError, MopResult};
use crate::layout::Layout;
use crate::symbol::Symbol;
use crate::value::Value;
use mop_config::TARGET_CLASS;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct Storage {
    layout: Arc<Layout>,
    /// `None` marks an unbound slot
    slots: Vec<Option<Value>>,
}

impl Storage {
    fn migrate(&mut self, current: Arc<Layout>) {
        let slots = current
            .slot_names()
            .iter()
            .map(|name| {
                self.layout
                    .position_of(name)
                    .and_then(|old| self.slots[old].take())
            })
            .collect();
        self.slots = slots;
        self.layout = current;
    }
}

struct InstanceData {
    class: ClassHandle,
    storage: RwLock<Storage>,
}

/// Shared reference to an instance of a standard class
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

impl Instance {
    pub(crate) fn allocate(class: ClassHandle, layout: Arc<Layout>) -> Self {
        let slots = vec![None; layout.len()];
        Self(Arc::new(InstanceData {
            class,
            storage: RwLock::new(Storage { layout, slots }),
        }))
    }

    pub fn class(&self) -> &ClassHandle {
        &self.0.class
    }

    /// The layout this instance is currently stored under
    pub fn layout(&self) -> Arc<Layout> {
        self.0.storage.read().layout.clone()
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Whether the class has been redefined since this instance was last updated
    pub fn is_obsolete(&self) -> bool {
        match self.0.class.layout() {
            Some(current) => !Arc::ptr_eq(&current, &self.0.storage.read().layout),
            None => true,
        }
    }

    pub fn describe(&self) -> String {
        match self.0.class.name() {
            Some(name) => format!("#<{name}>"),
            None => "#<INSTANCE>".to_string(),
        }
    }

    // ==================== 位置访问 ====================

    /// Read a slot by position; `None` if unbound
    pub fn standard_instance_access(&self, index: usize) -> MopResult<Option<Value>> {
        let storage = self.0.storage.read();
        storage
            .slots
            .get(index)
            .cloned()
            .ok_or(MopError::SlotIndexOutOfRange {
                index,
                len: storage.slots.len(),
            })
    }

    pub fn set_standard_instance_access(&self, index: usize, value: Value) -> MopResult<()> {
        let mut storage = self.0.storage.write();
        let len = storage.slots.len();
        match storage.slots.get_mut(index) {
            Some(cell) => {
                *cell = Some(value);
                Ok(())
            }
            None => Err(MopError::SlotIndexOutOfRange { index, len }),
        }
    }

    // ==================== 命名访问 ====================

    /// Migrate to the class's current layout if this instance is obsolete.
    ///
    /// Retained slots keep their values, added slots start unbound and
    /// dropped slots are discarded. Returns whether a migration happened.
    pub fn update_for_current_layout(&self) -> MopResult<bool> {
        let current = self.0.class.layout().ok_or_else(|| MopError::NotFinalized {
            class: self.0.class.describe(),
        })?;
        if Arc::ptr_eq(&self.0.storage.read().layout, &current) {
            return Ok(false);
        }

        let mut storage = self.0.storage.write();
        if Arc::ptr_eq(&storage.layout, &current) {
            return Ok(false);
        }
        tracing::debug!(
            target: TARGET_CLASS,
            instance = %self.describe(),
            from = storage.layout.version(),
            to = current.version(),
            "obsolete instance updated"
        );
        storage.migrate(current);
        Ok(true)
    }

    fn position(&self, storage: &Storage, name: &Symbol) -> MopResult<usize> {
        storage
            .layout
            .position_of(name)
            .ok_or_else(|| MopError::MissingSlot {
                slot: name.clone(),
                class: self.0.class.describe(),
            })
    }

    pub fn slot_value(&self, name: &Symbol) -> MopResult<Value> {
        self.update_for_current_layout()?;
        let storage = self.0.storage.read();
        let index = self.position(&storage, name)?;
        storage.slots[index]
            .clone()
            .ok_or_else(|| MopError::UnboundSlot {
                slot: name.clone(),
                instance: self.describe(),
            })
    }

    pub fn set_slot_value(&self, name: &Symbol, value: Value) -> MopResult<()> {
        self.update_for_current_layout()?;
        let mut storage = self.0.storage.write();
        let index = self.position(&storage, name)?;
        storage.slots[index] = Some(value);
        Ok(())
    }

    pub fn slot_boundp(&self, name: &Symbol) -> MopResult<bool> {
        self.update_for_current_layout()?;
        let storage = self.0.storage.read();
        let index = self.position(&storage, name)?;
        Ok(storage.slots[index].is_some())
    }

    pub fn slot_makunbound(&self, name: &Symbol) -> MopResult<()> {
        self.update_for_current_layout()?;
        let mut storage = self.0.storage.write();
        let index = self.position(&storage, name)?;
        storage.slots[index] = None;
        Ok(())
    }

    /// Whether the current layout has a slot of this name
    pub fn slot_exists_p(&self, name: &Symbol) -> MopResult<bool> {
        self.update_for_current_layout()?;
        Ok(self.0.storage.read().layout.contains(name))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
