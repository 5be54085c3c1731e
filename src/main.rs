//! Monitor Layout - snapshot, check and restore multi-monitor arrangements.
//!
//! Reads the position and rotation of every desktop-attached monitor,
//! compares them with a JSON layout file keyed by monitor identity, and
//! moves misplaced monitors back with a single staged display change.
//!
//!   monitor-layout --save_config            # Capture the current layout to config.json
//!   monitor-layout                          # Compare and offer to fix
//!   monitor-layout --check -f json          # Report only, machine readable
//!   monitor-layout --config desk.json -y    # Apply a specific layout unattended

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::{self, Write};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    check, check_and_apply, format_apply_report, format_report, format_snapshot_table, save_layout,
    OutputFormat, RunOutcome,
};
use cli::Cli;
use domain::Confirm;
use infrastructure::{load_targets, open_native, AssumeYes, ConsolePrompt};

/// Exit status when the layout configuration cannot be loaded.
const EXIT_CONFIG_LOAD: i32 = -1;
/// Exit status for other failures, and for `--check` finding differences.
const EXIT_FAILURE: i32 = 1;

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let code = if e.is_config_load() {
                EXIT_CONFIG_LOAD
            } else {
                EXIT_FAILURE
            };
            std::process::exit(code);
        }
    }
}

/// Main application logic. Returns the process exit code.
fn run(cli: &Cli) -> domain::Result<i32> {
    let format = cli
        .output_format()
        .map_err(|message| domain::AppError::InvalidArgument { message })?;

    if cli.save_config {
        return cmd_save(cli, format);
    }

    let targets = load_targets(&cli.config)?;
    let platform = open_native()?;

    if cli.check {
        let report = check(platform.as_ref(), &targets);
        print_report(&report, format)?;
        return Ok(if report.overall_match { 0 } else { EXIT_FAILURE });
    }

    let mut confirm: Box<dyn Confirm> = match (cli.yes, format) {
        (true, _) => Box::new(AssumeYes),
        (false, OutputFormat::Table) => Box::new(ConsolePrompt::stdio()),
        (false, OutputFormat::Json) => Box::new(ConsolePrompt::new(io::stdin().lock(), io::stderr())),
    };

    let mut printed = Ok(());
    let outcome = check_and_apply(platform.as_ref(), &targets, confirm.as_mut(), |report| {
        printed = print_report(report, format);
    });
    printed?;

    print_status(format, &outcome_message(&outcome))?;
    Ok(0)
}

fn outcome_message(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::InSync(_) => format!("{} No changes needed", "✓".green().bold()),
        RunOutcome::NothingToApply(_) => format!(
            "{} No connected monitor can be moved; check the configuration or reconnect missing monitors",
            "!".yellow().bold()
        ),
        RunOutcome::Declined(_) => "Layout left unchanged".to_string(),
        RunOutcome::Applied { report, .. } => format_apply_report(report),
    }
}

/// Snapshot command: write the current layout to the configuration file.
fn cmd_save(cli: &Cli, format: OutputFormat) -> domain::Result<i32> {
    let platform = open_native()?;
    let entries = save_layout(platform.as_ref(), &cli.config)?;

    if format == OutputFormat::Table {
        println!("{}", format_snapshot_table(&entries));
    }
    let message = format!(
        "{} Saved {} monitor(s) to {}",
        "✓".green().bold(),
        entries.len(),
        cli.config.display()
    );
    print_status(format, &message)?;

    Ok(0)
}

fn print_report(report: &domain::ReconcileReport, format: OutputFormat) -> domain::Result<()> {
    let output = format_report(report, format).map_err(domain::AppError::json_parse)?;
    println!("{output}");
    Ok(())
}

/// Prints a human-readable status line. JSON runs keep stdout for the
/// report alone, so the line goes to stderr there.
fn print_status(format: OutputFormat, message: &str) -> domain::Result<()> {
    write_status(&mut io::stdout().lock(), &mut io::stderr().lock(), format, message)
        .map_err(|e| domain::AppError::io("Failed to write status", e))
}

fn write_status(
    stdout: &mut impl Write,
    stderr: &mut impl Write,
    format: OutputFormat,
    message: &str,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => writeln!(stdout, "{message}"),
        OutputFormat::Json => writeln!(stderr, "{message}"),
    }
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
