//! Filesystem build directories
//!
//! Reads `<dir>/ebin/<app>.app` for the version and `<dir>/ebin/*.beam` for
//! the units.

#![allow(clippy::result_large_err)]

use crate::app_resource::{parse_app_resource, AppResource};
use crate::artifact::decode_unit;
use crate::errors::{artifact_read, io_error, Result};
use relswap_core::errors::RelswapError;
use relswap_core::{ArtifactStore, CompiledUnit, UnitId};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const UNIT_EXTENSION: &str = "beam";
pub const RESOURCE_EXTENSION: &str = "app";

/// Artifact store over build directories of one application
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    app: String,
}

impl FsArtifactStore {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn ebin(dir: &Path) -> PathBuf {
        dir.join("ebin")
    }

    pub fn resource_path(&self, dir: &Path) -> PathBuf {
        Self::ebin(dir).join(format!("{}.{}", self.app, RESOURCE_EXTENSION))
    }

    pub fn unit_path(dir: &Path, id: &UnitId) -> PathBuf {
        Self::ebin(dir).join(format!("{}.{}", id, UNIT_EXTENSION))
    }

    /// Read and parse the application resource file.
    ///
    /// # Errors
    ///
    /// `ArtifactRead` if it is missing, unparsable, or names another application.
    pub fn read_resource(&self, dir: &Path) -> Result<AppResource> {
        let path = self.resource_path(dir);
        let src = fs::read_to_string(&path).map_err(|e| artifact_read(&path, e.to_string()))?;
        let resource =
            parse_app_resource(&src).map_err(|e| e.with_path(path.display().to_string()))?;
        if resource.name != self.app {
            return Err(artifact_read(
                &path,
                format!("describes application {}, expected {}", resource.name, self.app),
            ));
        }
        Ok(resource)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn read_version(&self, dir: &Path) -> Result<String> {
        let resource = self.read_resource(dir)?;
        resource.vsn.ok_or_else(|| {
            RelswapError::MissingVersion {
                path: self.resource_path(dir).display().to_string(),
            }
            .into()
        })
    }

    fn list_unit_ids(&self, dir: &Path) -> Result<BTreeSet<UnitId>> {
        let ebin = Self::ebin(dir);
        let entries = fs::read_dir(&ebin).map_err(|e| io_error("list_units", &ebin, e))?;

        let mut ids = BTreeSet::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error("list_units", &ebin, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(UNIT_EXTENSION) {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| artifact_read(&path, "unit file name is not valid UTF-8"))?;
            ids.insert(UnitId::new(stem));
        }

        tracing::debug!(directory = %dir.display(), units = ids.len(), "listed units");
        Ok(ids)
    }

    fn read_unit(&self, dir: &Path, id: &UnitId) -> Result<CompiledUnit> {
        let path = Self::unit_path(dir, id);
        let bytes = fs::read(&path).map_err(|e| artifact_read(&path, e.to_string()))?;
        let unit = decode_unit(&path, id, bytes)?;
        tracing::debug!(
            unit_id = %id,
            chunks = unit.chunk_count(),
            references = unit.references().len(),
            "read unit"
        );
        Ok(unit)
    }
}
