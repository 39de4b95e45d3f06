//! 实例布局（Layout）
//!
//! 槽名 → 存储位置的有序映射。一个 Layout 一经构造即不可变；
//! 类重定义时生成新的 Layout，而不是原地修改槽顺序。

use crate::error::{MopError, MopResult};
use crate::symbol::Symbol;
use mop_config::TARGET_LAYOUT;
use std::collections::{HashMap, HashSet};

/// Immutable slot layout of one class generation
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Name of the class this layout was built for (diagnostics only)
    owner: Option<Symbol>,
    /// Generation of the owning class
    version: u64,
    /// Slot names; a slot's position is its index
    slots: Vec<Symbol>,
    /// Precomputed name → index map
    positions: HashMap<Symbol, usize>,
}

impl Layout {
    /// Build a layout from a class's own slots and its inherited slots.
    ///
    /// Inherited slots come first, in inherited order, except those the class
    /// redeclares: a redeclared slot takes the position of the most-derived
    /// declaration. Duplicates within either list cannot be disambiguated.
    pub fn build(owned: &[Symbol], inherited: &[Symbol]) -> MopResult<Layout> {
        Self::build_for(None, owned, inherited)
    }

    /// Like [`Layout::build`], recording the owning class's name
    pub fn build_for(
        owner: Option<&Symbol>,
        owned: &[Symbol],
        inherited: &[Symbol],
    ) -> MopResult<Layout> {
        let owned_set = unique_names(owner, owned)?;
        unique_names(owner, inherited)?;

        let slots: Vec<Symbol> = inherited
            .iter()
            .filter(|name| !owned_set.contains(*name))
            .chain(owned.iter())
            .cloned()
            .collect();

        tracing::trace!(
            target: TARGET_LAYOUT,
            owner = ?owner.map(Symbol::name),
            slots = slots.len(),
            "layout built"
        );
        Ok(Self::from_ordered(owner.cloned(), slots))
    }

    /// A layout with a fixed, already-validated slot order
    pub(crate) fn fixed(owner: Symbol, slots: &[&str]) -> Layout {
        Self::from_ordered(Some(owner), slots.iter().map(Symbol::new).collect())
    }

    /// The empty layout of classes without instance storage
    pub(crate) fn empty(owner: Option<Symbol>) -> Layout {
        Self::from_ordered(owner, Vec::new())
    }

    fn from_ordered(owner: Option<Symbol>, slots: Vec<Symbol>) -> Layout {
        let positions = slots
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Layout {
            owner,
            version: 0,
            slots,
            positions,
        }
    }

    /// Stamp the generation this layout belongs to
    pub(crate) fn with_version(mut self, version: u64) -> Layout {
        self.version = version;
        self
    }

    /// Storage position of a slot, O(1)
    pub fn position_of(&self, name: &Symbol) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn slot_names(&self) -> &[Symbol] {
        &self.slots
    }

    pub fn slot_name(&self, index: usize) -> Option<&Symbol> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn owner(&self) -> Option<&Symbol> {
        self.owner.as_ref()
    }

    pub fn contains(&self, name: &Symbol) -> bool {
        self.positions.contains_key(name)
    }
}

fn unique_names<'a>(
    owner: Option<&Symbol>,
    names: &'a [Symbol],
) -> MopResult<HashSet<&'a Symbol>> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name) {
            return Err(MopError::DuplicateSlot {
                slot: name.clone(),
                owner: owner.cloned(),
            });
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(Symbol::new).collect()
    }

    #[test]
    fn test_inherited_then_owned() {
        let layout = Layout::build(&syms(&["Z"]), &syms(&["X", "Y"])).unwrap();
        assert_eq!(layout.slot_names(), syms(&["X", "Y", "Z"]).as_slice());
        assert_eq!(layout.position_of(&Symbol::new("X")), Some(0));
        assert_eq!(layout.position_of(&Symbol::new("Z")), Some(2));
        assert_eq!(layout.position_of(&Symbol::new("W")), None);
    }

    #[test]
    fn test_redeclared_slot_takes_derived_position() {
        let layout = Layout::build(&syms(&["Y", "Z"]), &syms(&["X", "Y", "W"])).unwrap();
        assert_eq!(layout.slot_names(), syms(&["X", "W", "Y", "Z"]).as_slice());
    }

    #[test]
    fn test_duplicate_owned_slot() {
        let err = Layout::build_for(Some(&Symbol::new("P")), &syms(&["A", "A"]), &[]).unwrap_err();
        assert_eq!(
            err,
            MopError::DuplicateSlot {
                slot: Symbol::new("A"),
                owner: Some(Symbol::new("P")),
            }
        );
    }

    #[test]
    fn test_duplicate_inherited_slot() {
        let err = Layout::build(&[], &syms(&["A", "B", "A"])).unwrap_err();
        assert!(matches!(err, MopError::DuplicateSlot { .. }));
    }

    #[test]
    fn test_positions_cover_range() {
        let layout = Layout::build(&syms(&["D", "B"]), &syms(&["A", "B", "C"])).unwrap();
        let mut positions: Vec<usize> = layout
            .slot_names()
            .iter()
            .map(|name| layout.position_of(name).unwrap())
            .collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..layout.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_fixed_and_version() {
        let layout = Layout::fixed(Symbol::new("M"), &["A", "B"]).with_version(3);
        assert_eq!(layout.version(), 3);
        assert_eq!(layout.owner(), Some(&Symbol::new("M")));
        assert_eq!(layout.slot_name(1), Some(&Symbol::new("B")));
        assert!(Layout::empty(None).is_empty());
    }
}
