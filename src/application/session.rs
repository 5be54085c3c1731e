//! Top-level save, check and apply flows.
//!
//! Each flow runs one fresh enumeration pass. The target layout is passed in
//! by the caller and never modified.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{ApplyReport, Confirm, ReconcileReport, Result, TargetEntry, TargetMap};
use crate::infrastructure::{save_targets, DisplayPlatform};

use super::applier::apply;
use super::enumerator::capture;
use super::reconciler::reconcile;

/// What a check-and-apply run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Layout already matches the target.
    InSync(ReconcileReport),
    /// Layout deviates, but no monitor has a target it could be moved to.
    NothingToApply(ReconcileReport),
    /// The operator chose not to apply.
    Declined(ReconcileReport),
    Applied {
        before: ReconcileReport,
        report: ApplyReport,
    },
}

/// Current layout of every active monitor, in enumeration order.
///
/// Only the first monitor of any identity is kept, so the result always
/// loads back as a valid layout.
pub fn snapshot(platform: &dyn DisplayPlatform) -> Vec<TargetEntry> {
    let mut seen = HashSet::new();

    capture(platform)
        .into_iter()
        .filter(|record| {
            let first = seen.insert(record.identity.key());
            if !first {
                tracing::warn!(identity = %record.identity, adapter = %record.adapter, "Duplicate monitor identity, leaving it out of the layout");
            }
            first
        })
        .map(|record| TargetEntry {
            identity: record.identity,
            geometry: record.current,
        })
        .collect()
}

/// Captures the current layout and writes it to `path`.
///
/// # Errors
/// Returns error if the document cannot be written.
pub fn save_layout(platform: &dyn DisplayPlatform, path: &Path) -> Result<Vec<TargetEntry>> {
    let entries = snapshot(platform);
    if entries.is_empty() {
        tracing::warn!("No active monitors found, saving an empty layout");
    }
    save_targets(path, &entries)?;
    Ok(entries)
}

/// Compares the current layout with `targets` without changing anything.
pub fn check(platform: &dyn DisplayPlatform, targets: &TargetMap) -> ReconcileReport {
    reconcile(&capture(platform), targets)
}

/// Compares the current layout with `targets` and, if the operator agrees,
/// moves misplaced monitors into place.
///
/// `show_report` sees the comparison before the operator is asked.
pub fn check_and_apply(
    platform: &dyn DisplayPlatform,
    targets: &TargetMap,
    confirm: &mut dyn Confirm,
    show_report: impl FnOnce(&ReconcileReport),
) -> RunOutcome {
    let records = capture(platform);
    let before = reconcile(&records, targets);
    show_report(&before);

    if before.overall_match {
        return RunOutcome::InSync(before);
    }
    if before.mismatches().next().is_none() {
        return RunOutcome::NothingToApply(before);
    }

    let count = before.mismatches().count();
    let prompt = format!("Move {count} monitor(s) to the configured layout?");
    if !confirm.confirm(&prompt) {
        tracing::info!("Operator declined to apply layout");
        return RunOutcome::Declined(before);
    }

    let report = apply(platform, &records, targets);
    RunOutcome::Applied { before, report }
}
