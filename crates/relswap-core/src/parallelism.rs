//! Worker-pool selection for per-unit stages.

use serde::{Deserialize, Serialize};

/// How per-pair and per-unit work is scheduled.
///
/// Both modes produce identical results; stages join into ordered maps
/// before anything downstream runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// Process units one after another on the calling thread
    Sequential,
    /// Spread units over the global rayon pool
    #[default]
    Rayon,
}
