//! Output formatting for layout reports.
//!
//! Supports a table view for people and JSON for scripts.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{
    ApplyReport, CommitOutcome, ReconcileReport, StageOutcome, TargetEntry, VerdictOutcome,
};

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table listing.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Formats a reconcile report as a table with a summary line.
pub fn format_report_table(report: &ReconcileReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Monitor", "Current", "Target", "Status"]);

    for verdict in &report.verdicts {
        let (target, status) = match &verdict.outcome {
            VerdictOutcome::Match => (verdict.current.to_string(), "ok".green()),
            VerdictOutcome::Mismatch { target } => (target.to_string(), "mismatch".yellow()),
            VerdictOutcome::Unconfigured => ("-".to_string(), "unconfigured".red()),
        };
        table.add_row(vec![
            verdict.identity.to_string(),
            verdict.current.to_string(),
            target,
            status.to_string(),
        ]);
    }

    for identity in &report.missing {
        table.add_row(vec![
            identity.to_string(),
            "-".to_string(),
            "-".to_string(),
            "not connected".red().to_string(),
        ]);
    }

    let summary = if report.overall_match {
        format!("{} Layout matches the configuration", "✓".green().bold())
    } else {
        format!(
            "{} Layout differs from the configuration ({} of {} configured monitor(s) active)",
            "✗".red().bold(),
            report.matched,
            report.expected
        )
    };

    format!("{table}\n{summary}")
}

/// Formats a reconcile report as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_report_json(report: &ReconcileReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Formats a reconcile report in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_report(
    report: &ReconcileReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(format_report_table(report)),
        OutputFormat::Json => format_report_json(report),
    }
}

/// Formats the per-monitor stage results and the commit outcome.
pub fn format_apply_report(report: &ApplyReport) -> String {
    let mut out = String::new();

    for stage in &report.stages {
        let line = match &stage.outcome {
            StageOutcome::Staged => {
                format!("  {} {} → {}", "•".green(), stage.identity, stage.target)
            }
            StageOutcome::Rejected { reason } => {
                format!("  {} {}: {}", "✗".red(), stage.identity, reason)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    let summary = match &report.commit {
        CommitOutcome::Committed if report.success() => {
            format!("{} Layout applied", "✓".green().bold())
        }
        CommitOutcome::Committed => format!(
            "{} Layout applied for {} monitor(s), {} could not be staged",
            "!".yellow().bold(),
            report.staged_count(),
            report.rejected().count()
        ),
        CommitOutcome::Rejected { reason } => {
            format!("{} Failed to apply layout: {reason}", "✗".red().bold())
        }
        CommitOutcome::NotAttempted => format!(
            "{} Failed to apply layout: no monitor accepted its change",
            "✗".red().bold()
        ),
    };
    out.push_str(&summary);

    out
}

/// Formats a freshly captured layout as a table.
pub fn format_snapshot_table(entries: &[TargetEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Monitor", "X", "Y", "Rotation"]);

    for entry in entries {
        table.add_row(vec![
            entry.identity.to_string(),
            entry.geometry.x.to_string(),
            entry.geometry.y.to_string(),
            entry.geometry.rotation.to_string(),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AdapterHandle, Geometry, MonitorIdentity, MonitorStage, Rotation, Verdict,
    };

    fn report() -> ReconcileReport {
        ReconcileReport {
            overall_match: false,
            verdicts: vec![Verdict {
                identity: MonitorIdentity::new("A"),
                current: Geometry::new(100, 0, Rotation::Deg0),
                outcome: VerdictOutcome::Mismatch {
                    target: Geometry::new(0, 0, Rotation::Deg90),
                },
            }],
            matched: 1,
            expected: 2,
            missing: vec![MonitorIdentity::new("B")],
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_lists_verdicts_and_missing_monitors() {
        colored::control::set_override(false);
        let out = format_report_table(&report());

        assert!(out.contains("mismatch"));
        assert!(out.contains("not connected"));
        assert!(out.contains("1 of 2"));
    }

    #[test]
    fn test_json_report_shape() {
        let json = format_report_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["overall_match"], false);
        assert_eq!(value["verdicts"][0]["status"], "mismatch");
        assert_eq!(value["verdicts"][0]["target"]["rotation"], 1);
        assert_eq!(value["missing"][0], "B");
    }

    #[test]
    fn test_apply_summary_mentions_commit_failure() {
        colored::control::set_override(false);
        let report = ApplyReport {
            stages: vec![MonitorStage {
                identity: MonitorIdentity::new("A"),
                adapter: AdapterHandle::new("D1"),
                target: Geometry::default(),
                outcome: StageOutcome::Staged,
            }],
            commit: CommitOutcome::Rejected {
                reason: "commit rejected: bad mode".into(),
            },
        };

        assert!(format_apply_report(&report).contains("Failed to apply layout"));
    }
}
