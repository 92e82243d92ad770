//! Instruction list building
//!
//! Turns one direction's added/changed/removed sets into an ordered
//! sequence: every add, then every load, then every delete. Within a
//! category ids are ascending, which keeps output stable; the installer is
//! free to reorder loads using the attached hints.

use crate::model::{ChangeSet, Direction, Instruction, UnitId};
use std::collections::{BTreeMap, BTreeSet};

/// Build one direction's sequence.
pub fn build_instructions(
    added: &BTreeSet<UnitId>,
    changed: &BTreeMap<UnitId, BTreeSet<UnitId>>,
    removed: &BTreeSet<UnitId>,
) -> Vec<Instruction> {
    let adds = added
        .iter()
        .map(|id| Instruction::AddUnit { id: id.clone() });
    let loads = changed.iter().map(|(id, deps)| Instruction::LoadUnit {
        id: id.clone(),
        deps: deps.clone(),
    });
    let deletes = removed
        .iter()
        .map(|id| Instruction::DeleteUnit { id: id.clone() });

    adds.chain(loads).chain(deletes).collect()
}

/// Build the sequence for `direction` from one change set.
///
/// `hints` holds the significant changed units and their dependency hints;
/// it is shared by both directions while added and removed swap roles.
pub fn build_for(
    direction: Direction,
    change_set: &ChangeSet<'_>,
    hints: &BTreeMap<UnitId, BTreeSet<UnitId>>,
) -> Vec<Instruction> {
    match direction {
        Direction::Upgrade => build_instructions(&change_set.added, hints, &change_set.removed),
        Direction::Downgrade => build_instructions(&change_set.removed, hints, &change_set.added),
    }
}
