//! Dependency hint extraction
//!
//! For each significant change, record which other changing units it
//! references. These are hints for the installer, which owns the final load
//! order and any cycle breaking; nothing here sorts units.

use crate::model::{ChangedPair, CompiledUnit, UnitId};
use crate::parallelism::Parallelism;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// References of `unit` that are themselves changing, self excluded.
pub fn extract_references(unit: &CompiledUnit, changing: &BTreeSet<UnitId>) -> BTreeSet<UnitId> {
    unit.references()
        .iter()
        .filter(|r| *r != unit.id() && changing.contains(*r))
        .cloned()
        .collect()
}

/// Hints for every significant changed unit, keyed by unit id.
///
/// Uses the new unit's symbol table; the same hints serve both directions.
pub fn extract_all(
    significant: &BTreeMap<UnitId, ChangedPair<'_>>,
    parallelism: Parallelism,
) -> BTreeMap<UnitId, BTreeSet<UnitId>> {
    let changing: BTreeSet<UnitId> = significant.keys().cloned().collect();
    match parallelism {
        Parallelism::Sequential => significant
            .iter()
            .map(|(id, pair)| (id.clone(), extract_references(pair.new, &changing)))
            .collect(),
        Parallelism::Rayon => significant
            .par_iter()
            .map(|(id, pair)| (id.clone(), extract_references(pair.new, &changing)))
            .collect(),
    }
}
