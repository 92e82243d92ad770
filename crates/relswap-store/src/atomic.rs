//! Atomic file replacement
//!
//! Content lands in a sibling temp file first and is renamed over the
//! target, so readers see either the old file or the complete new one.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp", name))
}

/// Atomically write bytes to a file, creating parent directories.
///
/// # Errors
///
/// `Io` if any step fails; the temp file is removed and the target is left
/// untouched.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }

    let temp = temp_path(target);
    let written = fs::File::create(&temp)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .map_err(|e| io_error("write_temp", &temp, e))
        .and_then(|()| fs::rename(&temp, target).map_err(|e| io_error("rename_temp", target, e)));

    if written.is_err() {
        let _ = fs::remove_file(&temp);
    }
    written
}
