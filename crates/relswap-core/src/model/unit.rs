//! Compiled units and the build directories that hold them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifier of a compiled unit, unique within a build directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Tag naming a chunk inside a unit's binary form (`Code`, `AtU8`, `Dbgi`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkKind(String);

impl ChunkKind {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Debug information chunk; the default non-semantic kind.
    pub fn debug_info() -> Self {
        Self::new("Dbgi")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChunkKind {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A parsed compiled unit.
///
/// Holds the raw byte representation (what the comparator looks at), the
/// chunks keyed by kind (what the significance filter looks at), and the
/// symbol table of other units it references (what the extractor looks at).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    id: UnitId,
    bytes: Vec<u8>,
    chunks: BTreeMap<ChunkKind, Vec<u8>>,
    references: BTreeSet<UnitId>,
}

impl CompiledUnit {
    /// Build a unit. A reference to the unit itself is dropped from the
    /// symbol table.
    pub fn new(
        id: UnitId,
        bytes: Vec<u8>,
        chunks: BTreeMap<ChunkKind, Vec<u8>>,
        references: BTreeSet<UnitId>,
    ) -> Self {
        let references = references.into_iter().filter(|r| r != &id).collect();
        Self {
            id,
            bytes,
            chunks,
            references,
        }
    }

    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// Raw byte representation as read from the artifact store
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn chunk(&self, kind: &ChunkKind) -> Option<&[u8]> {
        self.chunks.get(kind).map(Vec::as_slice)
    }

    pub fn chunks(&self) -> &BTreeMap<ChunkKind, Vec<u8>> {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Other units this unit references
    pub fn references(&self) -> &BTreeSet<UnitId> {
        &self.references
    }

    /// SHA-256 of the raw bytes, hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// A validated build: its version plus every unit it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirectory {
    version: String,
    units: BTreeMap<UnitId, CompiledUnit>,
}

impl BuildDirectory {
    /// Collect units into a directory. Later duplicates of an id replace
    /// earlier ones; stores list each id once.
    pub fn new(version: impl Into<String>, units: impl IntoIterator<Item = CompiledUnit>) -> Self {
        Self {
            version: version.into(),
            units: units.into_iter().map(|u| (u.id().clone(), u)).collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn units(&self) -> &BTreeMap<UnitId, CompiledUnit> {
        &self.units
    }

    pub fn unit(&self, id: &UnitId) -> Option<&CompiledUnit> {
        self.units.get(id)
    }

    pub fn ids(&self) -> BTreeSet<&UnitId> {
        self.units.keys().collect()
    }
}
