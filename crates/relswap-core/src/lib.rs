//! relswap Core - release upgrade planning kernel
//!
//! This crate computes the instruction sequences needed to move a running
//! application between two builds and back again:
//! - Version validation against build metadata
//! - Unit set comparison (added / removed / changed)
//! - Change significance filtering (non-semantic chunk differences)
//! - Dependency hint extraction between changing units
//! - Deterministic instruction ordering and descriptor assembly
//!
//! Filesystem access and serialization live behind the [`ArtifactStore`]
//! and [`DescriptorWriter`] traits.

pub mod compare;
pub mod deps;
pub mod descriptor;
pub mod errors;
pub mod instructions;
pub mod logging_facility;
pub mod model;
pub mod parallelism;
pub mod plan;
pub mod significance;
pub mod store;
pub mod summary;
pub mod version;
pub mod writer;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RelswapError, Result};
pub use model::{
    BuildDirectory, ChangeSet, ChangedPair, ChunkKind, CompiledUnit, Descriptor, Direction,
    Instruction, UnitId,
};
pub use parallelism::Parallelism;
pub use plan::{generate_descriptor, PlanOptions, PlanOutcome, PlanReport, PlanRequest};
pub use significance::SignificancePolicy;
pub use store::ArtifactStore;
pub use summary::render_human_summary;
pub use writer::DescriptorWriter;
