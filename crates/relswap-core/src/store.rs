//! Artifact store interface
//!
//! The core never touches a filesystem. Everything it knows about a build
//! directory comes through this trait, implemented by the filesystem store
//! in `relswap-store` and by in-memory fixtures in tests.

use crate::errors::Result;
use crate::model::{CompiledUnit, UnitId};
use std::collections::BTreeSet;
use std::path::Path;

/// Read-only access to build directories.
#[allow(clippy::result_large_err)]
pub trait ArtifactStore {
    /// Version declared by the directory's metadata.
    ///
    /// # Errors
    ///
    /// `ArtifactRead` if the metadata is missing, unparsable, or has no version.
    fn read_version(&self, dir: &Path) -> Result<String>;

    /// Identifiers of every unit in the directory.
    ///
    /// # Errors
    ///
    /// `ArtifactRead` or `Io` if the directory cannot be listed.
    fn list_unit_ids(&self, dir: &Path) -> Result<BTreeSet<UnitId>>;

    /// Parse one unit into chunks and a symbol table.
    ///
    /// # Errors
    ///
    /// `ArtifactRead` if the unit is missing, truncated, or corrupt.
    fn read_unit(&self, dir: &Path, id: &UnitId) -> Result<CompiledUnit>;
}
