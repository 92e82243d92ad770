//! Descriptor assembly.

use crate::model::{Descriptor, Instruction};

/// Package both sequences with their versions.
///
/// Versions are expected to be validated and sequences built already; no
/// further checks happen here.
pub fn assemble(
    from_version: impl Into<String>,
    to_version: impl Into<String>,
    upgrade: Vec<Instruction>,
    downgrade: Vec<Instruction>,
) -> Descriptor {
    Descriptor::new(from_version.into(), to_version.into(), upgrade, downgrade)
}
