//! CLI module for locreport
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{Cli, Commands};
pub use setup::{configure_colors, init_tracing};

use crate::commands::{handle_report, init_config, ReportOptions};
use anyhow::Result;

/// Run the parsed command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            config,
            products,
            reports_dir,
            format,
            output,
        } => handle_report(ReportOptions {
            config,
            products,
            reports_dir,
            format,
            output,
        }),
        Commands::Init { force } => init_config(force),
    }
}
