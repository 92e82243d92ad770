//! Instructions handed to the installer.

use crate::model::unit::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One step of a live transition.
///
/// Ordering of variants matches the mandatory category order inside a
/// sequence: adds, then loads, then deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Make a new unit available
    AddUnit { id: UnitId },
    /// Replace a unit's code; `deps` are other units changing in the same
    /// transition that this unit references
    LoadUnit { id: UnitId, deps: BTreeSet<UnitId> },
    /// Remove a unit
    DeleteUnit { id: UnitId },
}

impl Instruction {
    pub fn id(&self) -> &UnitId {
        match self {
            Instruction::AddUnit { id }
            | Instruction::LoadUnit { id, .. }
            | Instruction::DeleteUnit { id } => id,
        }
    }

    /// Position of this instruction's category in a sequence (0 = add, 1 = load, 2 = delete)
    pub fn category_rank(&self) -> u8 {
        match self {
            Instruction::AddUnit { .. } => 0,
            Instruction::LoadUnit { .. } => 1,
            Instruction::DeleteUnit { .. } => 2,
        }
    }
}

/// Which way a sequence moves the running system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// V1 to V2
    Upgrade,
    /// V2 back to V1
    Downgrade,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upgrade => f.write_str("upgrade"),
            Direction::Downgrade => f.write_str("downgrade"),
        }
    }
}
