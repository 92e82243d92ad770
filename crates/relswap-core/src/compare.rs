//! Artifact set comparison
//!
//! Partitions two unit collections into added, removed, and candidate
//! changed pairs using raw byte equality. Why two representations differ is
//! the significance filter's concern, not this module's.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::model::{BuildDirectory, ChangeSet, ChangedPair};
use crate::store::ArtifactStore;
use std::path::Path;

/// Read every unit of an already validated directory.
///
/// # Errors
///
/// Any listing or unit read failure; the whole load fails on the first one.
pub fn load_build_directory(
    store: &dyn ArtifactStore,
    dir: &Path,
    version: &str,
) -> Result<BuildDirectory> {
    let ids = store.list_unit_ids(dir)?;
    let units = ids
        .iter()
        .map(|id| store.read_unit(dir, id))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(directory = %dir.display(), units = units.len(), "build directory loaded");
    Ok(BuildDirectory::new(version, units))
}

/// Compare two build directories by unit id and raw bytes.
pub fn compare<'a>(v1: &'a BuildDirectory, v2: &'a BuildDirectory) -> ChangeSet<'a> {
    let mut change_set = ChangeSet::default();

    for (id, old) in v1.units() {
        match v2.unit(id) {
            None => {
                change_set.removed.insert(id.clone());
            }
            Some(new) if new.bytes() != old.bytes() => {
                change_set
                    .changed
                    .insert(id.clone(), ChangedPair::new(old, new));
            }
            Some(_) => {}
        }
    }

    change_set.added = v2
        .units()
        .keys()
        .filter(|id| v1.unit(id).is_none())
        .cloned()
        .collect();

    change_set
}
