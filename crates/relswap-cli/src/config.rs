//! `relswap.toml` configuration
//!
//! Every key is optional. Command-line flags win over file values, and
//! built-in defaults apply when neither is given.

#![allow(clippy::result_large_err)]

use relswap_core::errors::{ExError, RelswapError};
use relswap_core::{ChunkKind, Parallelism, SignificancePolicy};
use relswap_store::DescriptorFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "relswap.toml";
pub const DEFAULT_OUTPUT_ROOT: &str = "_build/relswap";

/// Values read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output_root: Option<PathBuf>,
    pub ignored_chunks: Option<Vec<String>>,
    pub parallel: Option<bool>,
    pub format: Option<DescriptorFormat>,
}

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_root: Option<PathBuf>,
    pub ignored_chunks: Vec<String>,
    pub sequential: bool,
    pub format: Option<DescriptorFormat>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_root: PathBuf,
    pub policy: SignificancePolicy,
    pub parallelism: Parallelism,
    pub format: DescriptorFormat,
}

fn invalid(reason: String) -> ExError {
    RelswapError::InvalidConfig { reason }.into()
}

pub fn parse(src: &str) -> Result<FileConfig, ExError> {
    toml::from_str(src).map_err(|e| invalid(e.to_string()))
}

/// Load `explicit`, or `relswap.toml` in the working directory if it exists.
///
/// # Errors
///
/// `InvalidConfig` if an explicitly named file is missing, or any file is
/// malformed or carries unknown keys.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, ExError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(FileConfig::default());
            }
            default
        }
    };

    let src = std::fs::read_to_string(&path)
        .map_err(|e| invalid(format!("cannot read {}: {}", path.display(), e)))?;
    let config = parse(&src).map_err(|e| e.with_path(path.display().to_string()))?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn chunk_kind(tag: &str) -> Result<ChunkKind, ExError> {
    if tag.is_empty() || tag.len() > 4 || !tag.is_ascii() {
        return Err(invalid(format!(
            "chunk tag {:?} must be one to four ASCII characters",
            tag
        )));
    }
    Ok(ChunkKind::from(tag))
}

/// Merge file values and overrides into the settings for a run.
///
/// # Errors
///
/// `InvalidConfig` if a chunk tag is malformed.
pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Settings, ExError> {
    let policy = if !overrides.ignored_chunks.is_empty() {
        let kinds = overrides
            .ignored_chunks
            .iter()
            .map(|t| chunk_kind(t))
            .collect::<Result<Vec<_>, _>>()?;
        SignificancePolicy::new(kinds)
    } else if let Some(tags) = &file.ignored_chunks {
        let kinds = tags
            .iter()
            .map(|t| chunk_kind(t))
            .collect::<Result<Vec<_>, _>>()?;
        SignificancePolicy::new(kinds)
    } else {
        SignificancePolicy::default()
    };

    let parallelism = if overrides.sequential || file.parallel == Some(false) {
        Parallelism::Sequential
    } else {
        Parallelism::Rayon
    };

    Ok(Settings {
        output_root: overrides
            .output_root
            .or(file.output_root)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        policy,
        parallelism,
        format: overrides.format.or(file.format).unwrap_or_default(),
    })
}
