//! C3 linearization of the superclass graph

use super::ClassHandle;
use crate::error::{MopError, MopResult};

/// Class precedence list of `this`, itself first.
///
/// Merges the precedence lists of the direct superclasses together with the
/// list of direct superclasses, always taking the first head that appears in
/// no other list's tail. `label` names the class in errors.
pub(crate) fn c3_linearize(
    this: &ClassHandle,
    label: &str,
    direct_superclasses: &[ClassHandle],
    limit: usize,
) -> MopResult<Vec<ClassHandle>> {
    let mut sequences: Vec<Vec<ClassHandle>> = direct_superclasses
        .iter()
        .map(ClassHandle::precedence_list)
        .collect();
    sequences.push(direct_superclasses.to_vec());

    let mut result = vec![this.clone()];
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(result);
        }

        let next = sequences
            .iter()
            .map(|seq| &seq[0])
            .find(|head| !sequences.iter().any(|seq| seq[1..].contains(*head)))
            .cloned()
            .ok_or_else(|| MopError::InconsistentPrecedence {
                class: label.to_string(),
            })?;

        if next == *this {
            return Err(MopError::InconsistentPrecedence {
                class: label.to_string(),
            });
        }
        result.push(next.clone());
        if result.len() > limit {
            return Err(MopError::HierarchyTooDeep {
                class: label.to_string(),
                limit,
            });
        }

        for seq in sequences.iter_mut() {
            if seq[0] == next {
                seq.remove(0);
            }
        }
    }
}
