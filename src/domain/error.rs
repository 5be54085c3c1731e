//! Domain-level error types for monitor-layout.
//!
//! All errors are typed with `thiserror`. Conditions the workflow expects
//! (end of enumeration, inactive adapters, rejected stage or commit calls)
//! are modelled as values, not as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Target configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Target configuration file is not a well-formed layout document.
    #[error("Failed to parse configuration file {}: {message}", path.display())]
    ConfigParse {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Target configuration contains no usable monitor entries.
    #[error("Configuration file {} contains no usable monitor entries", path.display())]
    ConfigEmpty { path: PathBuf },

    /// The same monitor identity is declared twice.
    #[error("Duplicate monitor in configuration: {identity}")]
    DuplicateMonitor { identity: String },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Command-line argument has an unusable value.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// No display backend exists for this operating system.
    #[error("Display configuration is not supported on {os}")]
    UnsupportedPlatform { os: &'static str },
}

impl AppError {
    /// Create a JSON error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Whether this error means the target configuration could not be loaded.
    #[must_use]
    pub const fn is_config_load(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParse { .. }
                | Self::ConfigEmpty { .. }
                | Self::DuplicateMonitor { .. }
        )
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
