//! Change significance filtering
//!
//! Raw byte comparison reports a change whenever a rebuild regenerates
//! incidental metadata such as debug information. This module classifies
//! each candidate pair and drops those whose only differences are in chunk
//! kinds the policy marks as non-semantic.

use crate::model::{ChangedPair, ChunkKind, UnitId};
use crate::parallelism::Parallelism;
use rayon::prelude::*;
use relswap_core_types::schema::EVENT_INSIGNIFICANT_CHANGE;
use std::collections::{BTreeMap, BTreeSet};

/// Chunk kinds whose differences have no runtime-observable effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignificancePolicy {
    ignorable: BTreeSet<ChunkKind>,
}

impl SignificancePolicy {
    pub fn new(ignorable: impl IntoIterator<Item = ChunkKind>) -> Self {
        Self {
            ignorable: ignorable.into_iter().collect(),
        }
    }

    /// Every chunk difference counts.
    pub fn strict() -> Self {
        Self::new([])
    }

    pub fn ignorable(&self) -> &BTreeSet<ChunkKind> {
        &self.ignorable
    }

    pub fn is_ignorable(&self, kind: &ChunkKind) -> bool {
        self.ignorable.contains(kind)
    }
}

impl Default for SignificancePolicy {
    /// Only debug information is ignorable.
    fn default() -> Self {
        Self::new([ChunkKind::debug_info()])
    }
}

/// Verdict for one candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Significance {
    /// Chunk counts differ; always kept
    ChunkCountDiffers { old: usize, new: usize },
    /// At least one differing kind is semantic; kept
    ContentDiffers(BTreeSet<ChunkKind>),
    /// Every differing kind is ignorable; discarded with a notice
    NonSemanticOnly(BTreeSet<ChunkKind>),
    /// No chunk differs; discarded
    Identical,
}

impl Significance {
    pub fn is_significant(&self) -> bool {
        matches!(
            self,
            Significance::ChunkCountDiffers { .. } | Significance::ContentDiffers(_)
        )
    }
}

/// Kinds whose content differs between the two units, including kinds
/// present on only one side.
pub fn differing_kinds(pair: &ChangedPair<'_>) -> BTreeSet<ChunkKind> {
    let old = pair.old.chunks();
    let new = pair.new.chunks();
    old.keys()
        .chain(new.keys())
        .filter(|kind| old.get(*kind) != new.get(*kind))
        .cloned()
        .collect()
}

/// Classify a single candidate pair.
pub fn classify(pair: &ChangedPair<'_>, policy: &SignificancePolicy) -> Significance {
    let (old, new) = (pair.old.chunk_count(), pair.new.chunk_count());
    if old != new {
        return Significance::ChunkCountDiffers { old, new };
    }

    let differing = differing_kinds(pair);
    if differing.is_empty() {
        Significance::Identical
    } else if differing.iter().all(|kind| policy.is_ignorable(kind)) {
        Significance::NonSemanticOnly(differing)
    } else {
        Significance::ContentDiffers(differing)
    }
}

/// Pairs split by verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    pub significant: BTreeMap<UnitId, ChangedPair<'a>>,
    /// Units discarded because only ignorable kinds differed, with those kinds
    pub ignored: BTreeMap<UnitId, BTreeSet<ChunkKind>>,
}

/// Keep only pairs whose difference is runtime-observable.
///
/// Emits one informational notice per pair discarded as non-semantic, in
/// unit id order regardless of `parallelism`.
pub fn filter_significant<'a>(
    changed: &BTreeMap<UnitId, ChangedPair<'a>>,
    policy: &SignificancePolicy,
    parallelism: Parallelism,
) -> FilterOutcome<'a> {
    let verdicts: Vec<(&UnitId, &ChangedPair<'a>, Significance)> = match parallelism {
        Parallelism::Sequential => changed
            .iter()
            .map(|(id, pair)| (id, pair, classify(pair, policy)))
            .collect(),
        Parallelism::Rayon => changed
            .par_iter()
            .map(|(id, pair)| (id, pair, classify(pair, policy)))
            .collect(),
    };

    let mut outcome = FilterOutcome::default();
    for (id, pair, verdict) in verdicts {
        match verdict {
            Significance::ChunkCountDiffers { .. } | Significance::ContentDiffers(_) => {
                outcome.significant.insert(id.clone(), *pair);
            }
            Significance::NonSemanticOnly(kinds) => {
                outcome.ignored.insert(id.clone(), kinds);
            }
            Significance::Identical => {
                tracing::debug!(unit_id = %id, "bytes differ but every chunk matches");
            }
        }
    }

    for (id, kinds) in &outcome.ignored {
        let chunks = kinds
            .iter()
            .map(ChunkKind::as_str)
            .collect::<Vec<_>>()
            .join(",");
        tracing::info!(
            component = module_path!(),
            op = "filter_significant",
            event = EVENT_INSIGNIFICANT_CHANGE,
            unit_id = %id,
            chunks = %chunks,
            "ignoring change confined to non-semantic chunks"
        );
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompiledUnit;

    fn unit(id: &str, chunks: &[(&str, &[u8])]) -> CompiledUnit {
        let chunks: BTreeMap<ChunkKind, Vec<u8>> = chunks
            .iter()
            .map(|(k, v)| (ChunkKind::from(*k), v.to_vec()))
            .collect();
        let bytes = chunks
            .iter()
            .flat_map(|(k, v)| k.as_str().bytes().chain(v.iter().copied()))
            .collect();
        CompiledUnit::new(UnitId::from(id), bytes, chunks, BTreeSet::new())
    }

    #[test]
    fn test_chunk_count_difference_is_significant() {
        let old = unit("a", &[("Code", b"1")]);
        let new = unit("a", &[("Code", b"1"), ("Dbgi", b"d")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::default());
        assert_eq!(verdict, Significance::ChunkCountDiffers { old: 1, new: 2 });
        assert!(verdict.is_significant());
    }

    #[test]
    fn test_debug_only_difference_is_not_significant() {
        let old = unit("a", &[("Code", b"1"), ("Dbgi", b"d1")]);
        let new = unit("a", &[("Code", b"1"), ("Dbgi", b"d2")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::default());
        assert_eq!(
            verdict,
            Significance::NonSemanticOnly([ChunkKind::debug_info()].into_iter().collect())
        );
    }

    #[test]
    fn test_debug_plus_code_difference_is_significant() {
        let old = unit("a", &[("Code", b"1"), ("Dbgi", b"d1")]);
        let new = unit("a", &[("Code", b"2"), ("Dbgi", b"d2")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::default());
        assert!(matches!(verdict, Significance::ContentDiffers(ref k) if k.len() == 2));
    }

    #[test]
    fn test_same_count_different_kinds_is_significant() {
        let old = unit("a", &[("Code", b"1"), ("Dbgi", b"d")]);
        let new = unit("a", &[("Code", b"1"), ("Line", b"d")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::default());
        assert!(verdict.is_significant());
    }

    #[test]
    fn test_identical_chunks_are_discarded() {
        let old = unit("a", &[("Code", b"1")]);
        let new = unit("a", &[("Code", b"1")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::default());
        assert_eq!(verdict, Significance::Identical);
        assert!(!verdict.is_significant());
    }

    #[test]
    fn test_strict_policy_keeps_debug_changes() {
        let old = unit("a", &[("Dbgi", b"d1")]);
        let new = unit("a", &[("Dbgi", b"d2")]);
        let verdict = classify(&ChangedPair::new(&old, &new), &SignificancePolicy::strict());
        assert!(verdict.is_significant());
    }

    #[test]
    fn test_configurable_set_covers_several_kinds() {
        let policy = SignificancePolicy::new(["Dbgi".into(), "CInf".into()]);
        let old = unit("a", &[("CInf", b"t1"), ("Dbgi", b"d1")]);
        let new = unit("a", &[("CInf", b"t2"), ("Dbgi", b"d2")]);
        assert!(!classify(&ChangedPair::new(&old, &new), &policy).is_significant());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let olds: Vec<CompiledUnit> = (0..16)
            .map(|i| unit(&format!("m{i}"), &[("Code", b"1"), ("Dbgi", b"x")]))
            .collect();
        let news: Vec<CompiledUnit> = (0..16)
            .map(|i| {
                let code: &[u8] = if i % 2 == 0 { b"2" } else { b"1" };
                unit(&format!("m{i}"), &[("Code", code), ("Dbgi", b"y")])
            })
            .collect();
        let changed: BTreeMap<UnitId, ChangedPair<'_>> = olds
            .iter()
            .zip(news.iter())
            .map(|(o, n)| (o.id().clone(), ChangedPair::new(o, n)))
            .collect();

        let policy = SignificancePolicy::default();
        let seq = filter_significant(&changed, &policy, Parallelism::Sequential);
        let par = filter_significant(&changed, &policy, Parallelism::Rayon);

        assert_eq!(seq, par);
        assert_eq!(seq.significant.len(), 8);
        assert_eq!(seq.ignored.len(), 8);
    }
}
