//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CalendarArgs, DeadlineArgs, TypesArgs};

/// Plazo - statutory response deadline calculator
#[derive(Parser)]
#[command(name = "plazo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine settings file (TOML)
    #[arg(short, long, global = true, env = "PLAZO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a response deadline
    Deadline(DeadlineArgs),

    /// List request categories and their terms
    Types(TypesArgs),

    /// Inspect the business calendar
    Calendar(CalendarArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the value)
    Minimal,
}
