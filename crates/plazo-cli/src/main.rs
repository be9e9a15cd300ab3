//! Plazo CLI - statutory response deadlines from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Deadline for a catalog category
//! plazo deadline --type peticion_general --created-at "2024-01-15 10:00:00"
//!
//! # Custom term with a suspension
//! plazo deadline --unit business_days --amount 10 --created-at 2024-01-15 \
//!     --suspension "2024-01-17 08:00..2024-01-18 17:00"
//!
//! # List the catalog
//! plazo types
//!
//! # Check a date or list a year's holidays
//! plazo calendar --date 2024-12-25
//! plazo calendar --year 2025
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with command output
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("plazo_cli=debug,plazo_config=debug,plazo_core=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Deadline(args) => commands::deadline::execute(args, settings, format)?,
        Commands::Types(args) => commands::types::execute(args, format)?,
        Commands::Calendar(args) => commands::calendar::execute(args, &settings, format)?,
    }

    Ok(())
}
