//! Comparison of live monitors against the target layout.

use std::collections::HashSet;

use crate::domain::{MonitorRecord, ReconcileReport, TargetMap, Verdict, VerdictOutcome};

/// Compares every active monitor with its target geometry.
///
/// The layout only counts as matching when every monitor is configured and
/// in place, and every configured monitor was found. A target that names a
/// disconnected monitor therefore fails the check even if all live monitors
/// match exactly. Several live monitors sharing one identity fill a single
/// target slot.
pub fn reconcile(records: &[MonitorRecord], targets: &TargetMap) -> ReconcileReport {
    let mut verdicts = Vec::with_capacity(records.len());
    let mut matched_keys = HashSet::new();

    for record in records.iter().filter(|r| !r.identity.is_blank()) {
        let outcome = match targets.get(&record.identity) {
            None => VerdictOutcome::Unconfigured,
            Some(entry) => {
                matched_keys.insert(entry.identity.key());
                if entry.geometry == record.current {
                    VerdictOutcome::Match
                } else {
                    VerdictOutcome::Mismatch {
                        target: entry.geometry,
                    }
                }
            }
        };

        tracing::debug!(identity = %record.identity, current = %record.current, ?outcome, "Reconciled monitor");

        verdicts.push(Verdict {
            identity: record.identity.clone(),
            current: record.current,
            outcome,
        });
    }

    let missing = targets
        .iter()
        .filter(|entry| {
            !records
                .iter()
                .any(|r| r.identity.key() == entry.identity.key())
        })
        .map(|entry| entry.identity.clone())
        .collect();

    let all_match = verdicts.iter().all(|v| v.outcome == VerdictOutcome::Match);
    let matched = matched_keys.len();
    let counts_agree = matched == targets.len();
    if !counts_agree {
        tracing::info!(
            matched,
            expected = targets.len(),
            "Active monitors do not cover the target layout"
        );
    }

    ReconcileReport {
        overall_match: all_match && counts_agree,
        verdicts,
        matched,
        expected: targets.len(),
        missing,
    }
}
