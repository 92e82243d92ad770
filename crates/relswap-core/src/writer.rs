//! Descriptor writer interface
//!
//! Serialization syntax is a contract with the installer and lives outside
//! the core; the core only hands over an assembled descriptor.

use crate::errors::Result;
use crate::model::Descriptor;
use std::path::PathBuf;

/// Persists descriptors for an application.
#[allow(clippy::result_large_err)]
pub trait DescriptorWriter {
    /// Serialize without writing. Identical input must give identical output.
    ///
    /// # Errors
    ///
    /// `Serialization` if the descriptor cannot be encoded.
    fn render(&self, app: &str, descriptor: &Descriptor) -> Result<String>;

    /// Serialize and write to the path derived from `app` and the
    /// descriptor's target version; returns that path.
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io`. Nothing is left at the target on failure.
    fn write(&self, app: &str, descriptor: &Descriptor) -> Result<PathBuf>;
}
