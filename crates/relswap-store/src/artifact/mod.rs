//! Compiled unit containers
//!
//! A unit file is an IFF-style form: `"FOR1"`, a big-endian `u32` form
//! length, the form type `"BEAM"`, then tagged chunks each padded to a
//! 4-byte boundary. The atom and import tables give the unit's own name and
//! the other units it calls.

#![allow(clippy::result_large_err)]

pub mod builder;
pub mod container;
pub mod symbols;

pub use builder::UnitBuilder;
pub use container::{parse_container, Container, ContainerError};

use crate::errors::{artifact_read, Result};
use relswap_core::errors::{ExError, RelswapError};
use relswap_core::{CompiledUnit, UnitId};
use std::collections::BTreeSet;
use std::path::Path;

/// Decode the bytes of unit `id` read from `path`.
///
/// # Errors
///
/// `ArtifactRead` if the container is malformed, has no atom table, or
/// declares a name other than `id`.
pub fn decode_unit(path: &Path, id: &UnitId, bytes: Vec<u8>) -> Result<CompiledUnit> {
    let container = parse_container(&bytes).map_err(|e| artifact_read(path, e.to_string()))?;
    let atoms = symbols::atoms(&container).map_err(|e| artifact_read(path, e.to_string()))?;

    let declared = atoms
        .first()
        .ok_or_else(|| artifact_read(path, "atom table is empty"))?;
    if declared != id.as_str() {
        let err: ExError = RelswapError::UnitNameMismatch {
            listed: id.to_string(),
            declared: declared.clone(),
        }
        .into();
        return Err(err.with_path(path.display().to_string()));
    }

    let references: BTreeSet<UnitId> = symbols::imported_modules(&container, &atoms)
        .map_err(|e| artifact_read(path, e.to_string()))?
        .into_iter()
        .map(UnitId::new)
        .collect();

    Ok(CompiledUnit::new(
        id.clone(),
        bytes,
        container.into_chunks(),
        references,
    ))
}
