//! Result of comparing two build directories.

use crate::model::unit::{CompiledUnit, UnitId};
use std::collections::{BTreeMap, BTreeSet};

/// Old and new versions of a unit whose bytes differ.
///
/// Borrows from the two `BuildDirectory` values being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedPair<'a> {
    pub old: &'a CompiledUnit,
    pub new: &'a CompiledUnit,
}

impl<'a> ChangedPair<'a> {
    pub fn new(old: &'a CompiledUnit, new: &'a CompiledUnit) -> Self {
        Self { old, new }
    }

    pub fn id(&self) -> &'a UnitId {
        self.new.id()
    }
}

/// Partition of unit ids between V1 and V2.
///
/// An id appears in at most one category; byte-identical units appear in none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet<'a> {
    /// Present only in V2
    pub added: BTreeSet<UnitId>,
    /// Present only in V1
    pub removed: BTreeSet<UnitId>,
    /// Present in both with differing bytes
    pub changed: BTreeMap<UnitId, ChangedPair<'a>>,
}

impl<'a> ChangeSet<'a> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn changed_ids(&self) -> BTreeSet<UnitId> {
        self.changed.keys().cloned().collect()
    }

    /// Same added/removed sets with a replacement changed map.
    pub fn with_changed(&self, changed: BTreeMap<UnitId, ChangedPair<'a>>) -> Self {
        Self {
            added: self.added.clone(),
            removed: self.removed.clone(),
            changed,
        }
    }
}
