//! Domain layer - core types for monitor layouts.
//!
//! This layer contains pure domain models and error types
//! without any platform or filesystem access.

pub mod confirm;
pub mod error;
pub mod models;
pub mod report;

pub use confirm::Confirm;
pub use error::{AppError, Result};
pub use models::{
    AdapterHandle, Geometry, GeometryChange, MonitorIdentity, MonitorRecord,
    Rotation, TargetEntry, TargetMap,
};
pub use report::{
    ApplyReport, CommitOutcome, MonitorStage, ReconcileReport, StageOutcome, Verdict,
    VerdictOutcome,
};
