//! Chunk container reader

use relswap_core::ChunkKind;
use std::collections::BTreeMap;
use thiserror::Error;

const FORM_MAGIC: &[u8; 4] = b"FOR1";
const FORM_TYPE: &[u8; 4] = b"BEAM";
const HEADER_LEN: usize = 12;

/// Structural problems found while reading a container
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("file is {0} bytes, too short for a container header")]
    TooShort(usize),

    #[error("bad magic, expected FOR1")]
    BadMagic,

    #[error("form type is not BEAM")]
    BadFormType,

    #[error("form length {declared} disagrees with file length {actual}")]
    BadFormLength { declared: usize, actual: usize },

    #[error("chunk header truncated at offset {0}")]
    TruncatedHeader(usize),

    #[error("chunk {tag} at offset {offset} runs {size} bytes past the end of the file")]
    TruncatedChunk {
        tag: String,
        offset: usize,
        size: usize,
    },

    #[error("chunk {0} appears more than once")]
    DuplicateChunk(String),

    #[error("no atom table")]
    MissingAtomTable,

    #[error("malformed atom table: {0}")]
    AtomTable(String),

    #[error("malformed import table: {0}")]
    ImportTable(String),
}

/// A parsed container: chunk payloads keyed by tag, padding stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    chunks: BTreeMap<ChunkKind, Vec<u8>>,
}

impl Container {
    pub fn chunk(&self, tag: &str) -> Option<&[u8]> {
        self.chunks.get(&ChunkKind::from(tag)).map(Vec::as_slice)
    }

    pub fn chunks(&self) -> &BTreeMap<ChunkKind, Vec<u8>> {
        &self.chunks
    }

    pub fn into_chunks(self) -> BTreeMap<ChunkKind, Vec<u8>> {
        self.chunks
    }
}

pub(crate) fn padded(len: usize) -> usize {
    (len + 3) & !3
}

pub(crate) fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Split a container into its chunks.
///
/// # Errors
///
/// Truncated input, wrong magic or form type, a form length that disagrees
/// with the input, or a repeated chunk tag.
pub fn parse_container(bytes: &[u8]) -> Result<Container, ContainerError> {
    if bytes.len() < HEADER_LEN {
        return Err(ContainerError::TooShort(bytes.len()));
    }
    if &bytes[0..4] != FORM_MAGIC {
        return Err(ContainerError::BadMagic);
    }
    let declared = read_u32(bytes, 4).ok_or(ContainerError::TooShort(bytes.len()))? as usize;
    if declared != bytes.len() - 8 {
        return Err(ContainerError::BadFormLength {
            declared,
            actual: bytes.len(),
        });
    }
    if &bytes[8..12] != FORM_TYPE {
        return Err(ContainerError::BadFormType);
    }

    let mut chunks = BTreeMap::new();
    let mut offset = HEADER_LEN;
    while offset < bytes.len() {
        if offset + 8 > bytes.len() {
            return Err(ContainerError::TruncatedHeader(offset));
        }
        let tag = String::from_utf8_lossy(&bytes[offset..offset + 4]).into_owned();
        let size = read_u32(bytes, offset + 4).ok_or(ContainerError::TruncatedHeader(offset))?
            as usize;
        let start = offset + 8;
        let end = start
            .checked_add(size)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| ContainerError::TruncatedChunk {
                tag: tag.clone(),
                offset,
                size,
            })?;

        if chunks
            .insert(ChunkKind::new(tag.clone()), bytes[start..end].to_vec())
            .is_some()
        {
            return Err(ContainerError::DuplicateChunk(tag));
        }
        offset = (start + padded(size)).min(bytes.len());
    }

    Ok(Container { chunks })
}
