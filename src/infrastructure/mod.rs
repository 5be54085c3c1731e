//! Infrastructure layer - external adapters (display subsystem, filesystem, console).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod display;
pub mod prompt;

pub use config::{load_targets, save_targets, DEFAULT_CONFIG_PATH};
pub use display::{open_native, DisplayPlatform};
pub use prompt::{AssumeYes, ConsolePrompt};
