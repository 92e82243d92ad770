use relswap_core::errors::{ExError, ExErrorKind, RelswapError, Result};
use relswap_core::{ArtifactStore, ChunkKind, CompiledUnit, UnitId};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// In-memory build directory keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryDir {
    pub version: Option<String>,
    pub units: BTreeMap<UnitId, CompiledUnit>,
}

/// Artifact store backed by a map of fake directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dirs: BTreeMap<PathBuf, MemoryDir>,
    unreadable: BTreeSet<(PathBuf, UnitId)>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory declaring `version` with the given units.
    pub fn with_dir(
        mut self,
        dir: &str,
        version: &str,
        units: impl IntoIterator<Item = CompiledUnit>,
    ) -> Self {
        self.dirs.insert(
            PathBuf::from(dir),
            MemoryDir {
                version: Some(version.to_string()),
                units: units.into_iter().map(|u| (u.id().clone(), u)).collect(),
            },
        );
        self
    }

    /// Make one unit fail to read.
    pub fn with_unreadable(mut self, dir: &str, id: &str) -> Self {
        self.unreadable.insert((PathBuf::from(dir), UnitId::from(id)));
        self
    }

    fn dir(&self, dir: &Path) -> Result<&MemoryDir> {
        self.dirs.get(dir).ok_or_else(|| {
            ExError::new(ExErrorKind::Io)
                .with_path(dir.display().to_string())
                .with_message("no such directory")
        })
    }
}

impl ArtifactStore for MemoryStore {
    fn read_version(&self, dir: &Path) -> Result<String> {
        self.dir(dir)?.version.clone().ok_or_else(|| {
            RelswapError::MissingVersion {
                path: dir.display().to_string(),
            }
            .into()
        })
    }

    fn list_unit_ids(&self, dir: &Path) -> Result<BTreeSet<UnitId>> {
        Ok(self.dir(dir)?.units.keys().cloned().collect())
    }

    fn read_unit(&self, dir: &Path, id: &UnitId) -> Result<CompiledUnit> {
        if self.unreadable.contains(&(dir.to_path_buf(), id.clone())) {
            return Err(RelswapError::ArtifactRead {
                path: format!("{}/{}", dir.display(), id),
                reason: "truncated chunk header".to_string(),
            }
            .into());
        }
        self.dir(dir)?.units.get(id).cloned().ok_or_else(|| {
            RelswapError::ArtifactRead {
                path: format!("{}/{}", dir.display(), id),
                reason: "missing".to_string(),
            }
            .into()
        })
    }
}

/// Build a unit from code and debug-info payloads plus its references.
///
/// The raw bytes are a tagged concatenation of the chunks, so any chunk
/// difference is also a byte difference.
#[allow(dead_code)]
pub fn unit(id: &str, code: &str, debug_info: &str, refs: &[&str]) -> CompiledUnit {
    unit_with_chunks(id, &[("Code", code), ("Dbgi", debug_info)], refs)
}

#[allow(dead_code)]
pub fn unit_with_chunks(id: &str, chunks: &[(&str, &str)], refs: &[&str]) -> CompiledUnit {
    let chunks: BTreeMap<ChunkKind, Vec<u8>> = chunks
        .iter()
        .map(|(k, v)| (ChunkKind::from(*k), v.as_bytes().to_vec()))
        .collect();
    let mut bytes = Vec::new();
    for (kind, data) in &chunks {
        bytes.extend_from_slice(kind.as_str().as_bytes());
        bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
        bytes.extend_from_slice(data);
    }
    CompiledUnit::new(
        UnitId::from(id),
        bytes,
        chunks,
        refs.iter().map(|r| UnitId::from(*r)).collect(),
    )
}

#[allow(dead_code)]
pub fn ids(items: &[&str]) -> BTreeSet<UnitId> {
    items.iter().map(|s| UnitId::from(*s)).collect()
}
