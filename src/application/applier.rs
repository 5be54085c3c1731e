//! Staged application of a target layout.
//!
//! Every monitor that needs to move is staged first. The platform persists
//! those changes without showing them, and a single commit at the end makes
//! the whole new layout visible at once.

use crate::domain::{
    ApplyReport, CommitOutcome, GeometryChange, MonitorRecord, MonitorStage, StageOutcome,
    TargetMap,
};
use crate::infrastructure::DisplayPlatform;

/// Stages position and rotation for each misplaced monitor, then commits.
///
/// Monitors without a target, or already in place, are skipped. A rejected
/// stage is recorded and the remaining monitors are still staged. Commit is
/// issued once if anything was staged; its failure is reported, not raised.
pub fn apply(
    platform: &dyn DisplayPlatform,
    records: &[MonitorRecord],
    targets: &TargetMap,
) -> ApplyReport {
    let mut stages = Vec::new();

    for record in records.iter().filter(|r| !r.identity.is_blank()) {
        let Some(entry) = targets.get(&record.identity) else {
            continue;
        };
        if entry.geometry == record.current {
            continue;
        }

        let change = GeometryChange::layout(entry.geometry);
        let outcome = match platform.stage(&record.adapter, &change) {
            Ok(()) => {
                tracing::info!(identity = %record.identity, from = %record.current, to = %entry.geometry, "Staged layout change");
                StageOutcome::Staged
            }
            Err(e) => {
                tracing::warn!(identity = %record.identity, adapter = %record.adapter, "{}", e);
                StageOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        };

        stages.push(MonitorStage {
            identity: record.identity.clone(),
            adapter: record.adapter.clone(),
            target: entry.geometry,
            outcome,
        });
    }

    let staged = stages
        .iter()
        .filter(|s| s.outcome == StageOutcome::Staged)
        .count();

    let commit = if staged == 0 {
        tracing::info!("Nothing staged, skipping commit");
        CommitOutcome::NotAttempted
    } else {
        match platform.commit() {
            Ok(()) => {
                tracing::info!(monitors = staged, "Committed staged layout");
                CommitOutcome::Committed
            }
            Err(e) => {
                tracing::error!("{}", e);
                CommitOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        }
    };

    ApplyReport { stages, commit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::enumerator::capture;
    use crate::domain::models::ChangedFields;
    use crate::domain::{Geometry, MonitorIdentity, Rotation, TargetEntry};
    use crate::infrastructure::display::mock::MockDisplay;

    fn targets(entries: &[(&str, i32, i32, Rotation)]) -> TargetMap {
        TargetMap::from_entries(entries.iter().map(|&(id, x, y, rotation)| TargetEntry {
            identity: MonitorIdentity::new(id),
            geometry: Geometry::new(x, y, rotation),
        }))
        .unwrap()
    }

    fn at(x: i32, y: i32, rotation: Rotation) -> Option<Geometry> {
        Some(Geometry::new(x, y, rotation))
    }

    #[test]
    fn test_layout_in_place_stages_nothing() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "A", at(0, 0, Rotation::Deg0))
            .with_monitor("D2", "B", at(1920, 0, Rotation::Deg90));
        let target = targets(&[
            (r"D1\A", 0, 0, Rotation::Deg0),
            (r"D2\B", 1920, 0, Rotation::Deg90),
        ]);

        let report = apply(&platform, &capture(&platform), &target);

        assert!(report.stages.is_empty());
        assert_eq!(report.commit, CommitOutcome::NotAttempted);
        assert_eq!(platform.commit_count(), 0);
    }

    #[test]
    fn test_moved_monitor_is_staged_with_layout_fields_only() {
        let platform = MockDisplay::new().with_monitor("D1", "A", at(100, 0, Rotation::Deg0));
        let target = targets(&[(r"D1\A", 0, 0, Rotation::Deg0)]);

        let report = apply(&platform, &capture(&platform), &target);

        let staged = platform.staged();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].0.name(), "D1");
        assert_eq!(staged[0].1.geometry, Geometry::new(0, 0, Rotation::Deg0));
        assert_eq!(staged[0].1.fields, ChangedFields::LAYOUT);
        assert_eq!(platform.commit_count(), 1);
        assert!(report.success());
        assert_eq!(capture(&platform)[0].current, Geometry::default());
    }

    #[test]
    fn test_rejected_stage_does_not_stop_others_or_commit() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "A", at(5, 0, Rotation::Deg0))
            .with_monitor("D2", "B", at(5, 0, Rotation::Deg0))
            .with_monitor("D3", "C", at(5, 0, Rotation::Deg0))
            .rejecting_stage("D2");
        let target = targets(&[
            (r"D1\A", 0, 0, Rotation::Deg0),
            (r"D2\B", 1920, 0, Rotation::Deg0),
            (r"D3\C", 3840, 0, Rotation::Deg0),
        ]);

        let report = apply(&platform, &capture(&platform), &target);

        let staged: Vec<String> = platform
            .staged()
            .iter()
            .map(|(adapter, _)| adapter.name().to_string())
            .collect();
        assert_eq!(staged, ["D1", "D3"]);
        assert_eq!(report.staged_count(), 2);
        assert_eq!(report.rejected().count(), 1);
        assert_eq!(report.commit, CommitOutcome::Committed);
        assert_eq!(platform.commit_count(), 1);
        assert!(!report.success());
    }

    #[test]
    fn test_commit_rejection_is_reported() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "A", at(5, 0, Rotation::Deg0))
            .rejecting_commit();
        let target = targets(&[(r"D1\A", 0, 0, Rotation::Deg0)]);

        let report = apply(&platform, &capture(&platform), &target);

        assert!(matches!(report.commit, CommitOutcome::Rejected { .. }));
        assert!(!report.success());
        assert_eq!(capture(&platform)[0].current, Geometry::new(5, 0, Rotation::Deg0));
    }

    #[test]
    fn test_unconfigured_and_inactive_monitors_are_skipped() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "A", at(5, 0, Rotation::Deg0))
            .with_monitor("D2", "B", None)
            .with_monitor("D3", "Stranger", at(0, 0, Rotation::Deg0));
        let target = targets(&[
            (r"D1\A", 0, 0, Rotation::Deg0),
            (r"D2\B", 1920, 0, Rotation::Deg0),
        ]);

        let report = apply(&platform, &capture(&platform), &target);

        assert_eq!(report.stages.len(), 1);
        assert_eq!(report.stages[0].identity.as_str(), r"D1\A");
    }

    #[test]
    fn test_all_stages_rejected_skips_commit() {
        let platform = MockDisplay::new()
            .with_monitor("D1", "A", at(5, 0, Rotation::Deg0))
            .rejecting_stage("D1");
        let target = targets(&[(r"D1\A", 0, 0, Rotation::Deg0)]);

        let report = apply(&platform, &capture(&platform), &target);

        assert_eq!(report.commit, CommitOutcome::NotAttempted);
        assert_eq!(platform.commit_count(), 0);
        assert!(!report.success());
    }
}
