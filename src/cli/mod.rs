//! CLI interface using clap.
//!
//! Provides the command-line flags selecting between snapshot, check and apply.

use std::path::PathBuf;

use clap::Parser;

use crate::application::OutputFormat;
use crate::infrastructure::DEFAULT_CONFIG_PATH;

/// Monitor Layout - keep monitor positions and rotations in a known arrangement.
///
/// Without flags, compares the current layout with the configuration file and
/// offers to move any misplaced monitors back into place.
#[derive(Parser, Debug)]
#[command(name = "monitor-layout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Layout configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Save the current layout to the configuration file and exit.
    #[arg(long = "save_config", conflicts_with_all = ["check", "yes"])]
    pub save_config: bool,

    /// Only report differences, never change the layout.
    #[arg(long)]
    pub check: bool,

    /// Apply without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Report format: table or json.
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
