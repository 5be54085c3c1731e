//! Outcomes of reconciling and applying a layout.

use serde::Serialize;

use super::models::{AdapterHandle, Geometry, MonitorIdentity};

/// Comparison result for one active monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerdictOutcome {
    /// Current geometry equals the target.
    Match,
    /// Monitor is configured but sits somewhere else.
    Mismatch { target: Geometry },
    /// Active monitor with no entry in the target layout.
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub identity: MonitorIdentity,
    pub current: Geometry,
    #[serde(flatten)]
    pub outcome: VerdictOutcome,
}

/// Aggregate result of comparing live monitors with a target layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// True only when every verdict matches and every target was found.
    pub overall_match: bool,
    pub verdicts: Vec<Verdict>,
    /// Distinct target identities with at least one active monitor.
    pub matched: usize,
    /// Number of monitors the target layout declares.
    pub expected: usize,
    /// Target identities with no active monitor.
    pub missing: Vec<MonitorIdentity>,
}

impl ReconcileReport {
    /// Verdicts that need a corrective change.
    pub fn mismatches(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts
            .iter()
            .filter(|v| matches!(v.outcome, VerdictOutcome::Mismatch { .. }))
    }

    #[must_use]
    pub fn unconfigured_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.outcome == VerdictOutcome::Unconfigured)
            .count()
    }
}

/// Result of staging one monitor's change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Staged,
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorStage {
    pub identity: MonitorIdentity,
    pub adapter: AdapterHandle,
    pub target: Geometry,
    pub outcome: StageOutcome,
}

/// Result of the single global commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    Rejected { reason: String },
    /// Nothing was staged, so no commit was issued.
    NotAttempted,
}

/// Everything the staged applier did during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub stages: Vec<MonitorStage>,
    pub commit: CommitOutcome,
}

impl ApplyReport {
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.outcome == StageOutcome::Staged)
            .count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &MonitorStage> {
        self.stages
            .iter()
            .filter(|s| matches!(s.outcome, StageOutcome::Rejected { .. }))
    }

    /// Commit went through and no monitor was left behind.
    #[must_use]
    pub fn success(&self) -> bool {
        self.commit == CommitOutcome::Committed && self.rejected().next().is_none()
    }
}
