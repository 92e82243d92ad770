//! relswap Store - filesystem side of release planning
//!
//! Provides:
//! - Chunk container parsing and encoding for compiled units
//! - A reader/printer for the term syntax of resource and descriptor files
//! - `FsArtifactStore`, the build-directory implementation of `ArtifactStore`
//! - `AppupWriter`, the atomic descriptor writer

pub mod app_resource;
pub mod artifact;
pub mod atomic;
pub mod errors;
pub mod fs_store;
pub mod term;
pub mod writer;

// Re-export key types
pub use artifact::{parse_container, UnitBuilder};
pub use errors::Result;
pub use fs_store::FsArtifactStore;
pub use writer::{AppupWriter, DescriptorFormat};
