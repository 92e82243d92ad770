//! Version validation
//!
//! Confirms that a build directory declares the version the caller expects
//! before any of its units are read.

#![allow(clippy::result_large_err)]

use crate::errors::{RelswapError, Result};
use crate::store::ArtifactStore;
use std::path::Path;

/// Check that `dir` declares `expected`; returns the validated version.
///
/// # Errors
///
/// - `VersionMismatch`: declared version differs from `expected`; the
///   message names the directory, the expected version, and the found one
/// - any error from [`ArtifactStore::read_version`]
pub fn validate(store: &dyn ArtifactStore, dir: &Path, expected: &str) -> Result<String> {
    let found = store.read_version(dir)?;
    if found != expected {
        return Err(RelswapError::VersionMismatch {
            directory: dir.display().to_string(),
            expected: expected.to_string(),
            found,
        }
        .into());
    }
    tracing::debug!(directory = %dir.display(), version = %found, "version validated");
    Ok(found)
}
