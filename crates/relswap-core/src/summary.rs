//! Human-readable summary renderer for planning runs.

use crate::model::{Instruction, UnitId};
use crate::plan::PlanOutcome;
use std::collections::BTreeSet;

/// Render a Markdown summary of a [`PlanOutcome`].
///
/// Intended for review before deployment. It is informational only and
/// never feeds back into the descriptor.
pub fn render_human_summary(outcome: &PlanOutcome) -> String {
    let descriptor = &outcome.descriptor;
    let report = &outcome.report;
    let mut out = String::new();

    out.push_str(&format!(
        "## Release Plan {} -> {}\n\n",
        descriptor.from_version(),
        descriptor.to_version()
    ));

    out.push_str(&format!(
        "| Added | Reloaded | Removed | Ignored | Unchanged |\n\
         |---|---|---|---|---|\n\
         | {} | {} | {} | {} | {} |\n\n",
        report.added.len(),
        report.loaded.len(),
        report.removed.len(),
        report.ignored.len(),
        report.unchanged,
    ));

    if descriptor.upgrade().is_empty() {
        out.push_str("_No runtime-observable changes._\n");
    } else {
        push_sequence(&mut out, "Upgrade", descriptor.upgrade());
        push_sequence(&mut out, "Downgrade", descriptor.downgrade());
    }

    if !report.ignored.is_empty() {
        out.push_str("\n### Ignored (non-semantic only)\n\n");
        for (id, kinds) in &report.ignored {
            let kinds: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
            out.push_str(&format!("- `{}` ({})\n", id, kinds.join(", ")));
        }
    }

    out
}

fn push_sequence(out: &mut String, title: &str, sequence: &[Instruction]) {
    out.push_str(&format!("### {title}\n\n"));
    for instruction in sequence {
        match instruction {
            Instruction::AddUnit { id } => out.push_str(&format!("- add `{}`\n", id)),
            Instruction::LoadUnit { id, deps } if deps.is_empty() => {
                out.push_str(&format!("- load `{}`\n", id))
            }
            Instruction::LoadUnit { id, deps } => {
                out.push_str(&format!("- load `{}` (after: {})\n", id, join(deps)))
            }
            Instruction::DeleteUnit { id } => out.push_str(&format!("- delete `{}`\n", id)),
        }
    }
    out.push('\n');
}

fn join(ids: &BTreeSet<UnitId>) -> String {
    ids.iter().map(UnitId::as_str).collect::<Vec<_>>().join(", ")
}
