//! Domain model: compiled units, change sets, instructions, descriptors.

pub mod change_set;
pub mod descriptor;
pub mod instruction;
pub mod unit;

pub use change_set::{ChangeSet, ChangedPair};
pub use descriptor::Descriptor;
pub use instruction::{Direction, Instruction};
pub use unit::{BuildDirectory, ChunkKind, CompiledUnit, UnitId};
