//! Application layer - use cases and orchestration.
//!
//! This layer discovers monitors, compares them with the target layout
//! and drives the staged apply.

pub mod applier;
pub mod enumerator;
pub mod formatter;
pub mod reconciler;
pub mod session;

pub use formatter::{format_apply_report, format_report, format_snapshot_table, OutputFormat};
pub use session::{check, check_and_apply, save_layout, RunOutcome};
