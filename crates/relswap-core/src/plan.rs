//! Descriptor planning pipeline
//!
//! Runs the stages once, strictly in order:
//!
//! ```text
//! validate(V1) → validate(V2) → load → compare → filter → extract hints
//!   → build(upgrade) + build(downgrade) → assemble
//! ```
//!
//! Both directories are validated before any unit is read. Every failure is
//! fatal and nothing is produced; insignificant changes are only logged.

#![allow(clippy::result_large_err)]

use crate::compare::{compare, load_build_directory};
use crate::deps::extract_all;
use crate::descriptor::assemble;
use crate::errors::{RelswapError, Result};
use crate::instructions::build_for;
use crate::model::{ChunkKind, Descriptor, Direction, UnitId};
use crate::parallelism::Parallelism;
use crate::significance::{filter_significant, SignificancePolicy};
use crate::store::ArtifactStore;
use crate::version::validate;
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Instant;

/// The two builds to plan between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub from_version: String,
    pub to_version: String,
    pub from_dir: PathBuf,
    pub to_dir: PathBuf,
}

/// Tunables that do not change the contract of the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    pub policy: SignificancePolicy,
    pub parallelism: Parallelism,
}

/// What the pipeline saw, for summaries. Never serialized into a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    /// Only in V2
    pub added: BTreeSet<UnitId>,
    /// Only in V1
    pub removed: BTreeSet<UnitId>,
    /// Significant changes with their dependency hints
    pub loaded: BTreeMap<UnitId, BTreeSet<UnitId>>,
    /// Changes discarded as non-semantic, with the chunk kinds that differed
    pub ignored: BTreeMap<UnitId, BTreeSet<ChunkKind>>,
    /// Units present in both builds with no chunk difference
    pub unchanged: usize,
}

/// Result of a planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutcome {
    pub descriptor: Descriptor,
    pub report: PlanReport,
}

/// Compute the upgrade/downgrade descriptor between two builds.
///
/// # Errors
///
/// - `InvalidInput`: an empty version string
/// - `VersionMismatch`: either directory declares a different version
/// - `ArtifactRead` / `Io`: any unit or metadata cannot be read
pub fn generate_descriptor(
    store: &dyn ArtifactStore,
    request: &PlanRequest,
    options: &PlanOptions,
) -> Result<PlanOutcome> {
    let start = Instant::now();
    log_op_start!(
        "generate_descriptor",
        from_version = request.from_version.as_str(),
        to_version = request.to_version.as_str()
    );

    match run(store, request, options) {
        Ok(outcome) => {
            log_op_end!(
                "generate_descriptor",
                duration_ms = start.elapsed().as_millis() as u64,
                added_len = outcome.report.added.len(),
                changed_len = outcome.report.loaded.len(),
                removed_len = outcome.report.removed.len()
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(
                "generate_descriptor",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn run(
    store: &dyn ArtifactStore,
    request: &PlanRequest,
    options: &PlanOptions,
) -> Result<PlanOutcome> {
    for version in [&request.from_version, &request.to_version] {
        if version.trim().is_empty() {
            return Err(RelswapError::InvalidInput {
                reason: "version strings must not be empty".to_string(),
            }
            .into());
        }
    }

    let from_version = validate(store, &request.from_dir, &request.from_version)?;
    let to_version = validate(store, &request.to_dir, &request.to_version)?;

    let v1 = load_build_directory(store, &request.from_dir, &from_version)?;
    let v2 = load_build_directory(store, &request.to_dir, &to_version)?;

    let candidates = compare(&v1, &v2);
    tracing::debug!(
        added = candidates.added.len(),
        removed = candidates.removed.len(),
        candidates = candidates.changed.len(),
        "compared build directories"
    );

    let filtered = filter_significant(&candidates.changed, &options.policy, options.parallelism);
    let change_set = candidates.with_changed(filtered.significant);
    let hints = extract_all(&change_set.changed, options.parallelism);

    let upgrade = build_for(Direction::Upgrade, &change_set, &hints);
    let downgrade = build_for(Direction::Downgrade, &change_set, &hints);
    let descriptor = assemble(from_version, to_version, upgrade, downgrade);

    let unchanged = v1.units().len()
        - change_set.removed.len()
        - change_set.changed.len()
        - filtered.ignored.len();
    let report = PlanReport {
        added: change_set.added,
        removed: change_set.removed,
        loaded: hints,
        ignored: filtered.ignored,
        unchanged,
    };

    Ok(PlanOutcome { descriptor, report })
}
