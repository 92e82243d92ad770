//! The final, immutable upgrade/downgrade descriptor.

use crate::model::instruction::Instruction;
use serde::{Deserialize, Serialize};

/// Forward and backward instruction sequences between two versions.
///
/// Fields are private: a descriptor is produced once by
/// [`assemble`](crate::descriptor::assemble) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    from_version: String,
    to_version: String,
    upgrade: Vec<Instruction>,
    downgrade: Vec<Instruction>,
}

impl Descriptor {
    pub(crate) fn new(
        from_version: String,
        to_version: String,
        upgrade: Vec<Instruction>,
        downgrade: Vec<Instruction>,
    ) -> Self {
        Self {
            from_version,
            to_version,
            upgrade,
            downgrade,
        }
    }

    pub fn from_version(&self) -> &str {
        &self.from_version
    }

    pub fn to_version(&self) -> &str {
        &self.to_version
    }

    pub fn upgrade(&self) -> &[Instruction] {
        &self.upgrade
    }

    pub fn downgrade(&self) -> &[Instruction] {
        &self.downgrade
    }
}
