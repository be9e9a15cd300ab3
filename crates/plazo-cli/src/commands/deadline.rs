//! Deadline command implementation.
//!
//! Calculates a response deadline either for a catalog category or for a
//! custom term.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use plazo_config::{DeadlineRequest, DeadlineService, EngineSettings, RequestType};
use plazo_core::strategies::{DeadlineBreakdown, Extension};
use plazo_core::{CalculationParams, TermUnit};

use crate::cli::OutputFormat;
use crate::commands::{parse_suspension, parse_timestamp, read_suspensions_file};
use crate::error::CliError;
use crate::output::{print_header, print_json, print_table, print_warning, KeyValue};

/// Arguments for the deadline command.
#[derive(Args, Debug)]
pub struct DeadlineArgs {
    /// Request category (see `plazo types`)
    #[arg(short = 't', long = "type", conflicts_with_all = ["unit", "amount"])]
    pub request_type: Option<String>,

    /// Custom term unit: hours, calendar_days or business_days
    #[arg(short, long, requires = "amount")]
    pub unit: Option<String>,

    /// Custom term amount
    #[arg(short, long, requires = "unit")]
    pub amount: Option<u32>,

    /// Submission instant (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS])
    #[arg(short = 'd', long)]
    pub created_at: String,

    /// Double the term
    #[arg(long)]
    pub double_term: bool,

    /// Keep the computed time instead of snapping to 23:59:59
    #[arg(long)]
    pub no_end_of_day: bool,

    /// Suspension as START..END (repeatable)
    #[arg(short, long = "suspension")]
    pub suspensions: Vec<String>,

    /// JSON file with a list of {id, start_at, end_at} suspensions
    #[arg(long)]
    pub suspensions_file: Option<PathBuf>,
}

/// One suspension row in table output.
#[derive(Debug, Serialize, Tabled)]
pub struct SuspensionRow {
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "End")]
    pub end: String,
    #[tabled(rename = "Extension")]
    pub extension: String,
}

/// JSON output of the command.
#[derive(Debug, Serialize)]
struct DeadlineOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    request_type: Option<RequestType>,
    created_at: String,
    double_term: bool,
    #[serde(flatten)]
    breakdown: &'a DeadlineBreakdown,
}

/// Execute the deadline command.
pub fn execute(args: DeadlineArgs, settings: EngineSettings, format: OutputFormat) -> Result<()> {
    let request = build_request(&args)?;
    let service = DeadlineService::new(settings)?;
    let breakdown = service.calculate_breakdown(&request)?;

    tracing::info!(deadline = %breakdown.deadline, "deadline computed");

    for discarded in &breakdown.discarded {
        let id = discarded.id.as_deref().unwrap_or("<no id>");
        tracing::warn!(id, reason = ?discarded.reason, "suspension ignored");
    }

    let params = request.params();
    match format {
        OutputFormat::Table => print_report(&request, &breakdown, service.calendar().name())?,
        OutputFormat::Json => print_json(&DeadlineOutput {
            request_type: request.request_type(),
            created_at: params.created_at.to_string(),
            double_term: params.double_term,
            breakdown: &breakdown,
        })?,
        OutputFormat::Minimal => println!("{}", breakdown.deadline),
    }

    Ok(())
}

/// Turns the arguments into a request.
pub fn build_request(args: &DeadlineArgs) -> Result<DeadlineRequest, CliError> {
    let created_at = parse_timestamp(&args.created_at)?;

    let mut request = match (&args.request_type, &args.unit, args.amount) {
        (Some(id), _, _) => {
            let request_type: RequestType = id.parse()?;
            DeadlineRequest::for_type(request_type, created_at, args.double_term)
        }
        (None, Some(unit), Some(amount)) => {
            let unit: TermUnit = unit.parse()?;
            DeadlineRequest::custom(
                CalculationParams::new(created_at, amount, unit).with_double_term(args.double_term),
            )
        }
        _ => {
            return Err(CliError::MissingArgument(
                "--type, or --unit together with --amount".to_string(),
            ))
        }
    };

    let mut suspensions = Vec::new();
    if let Some(path) = &args.suspensions_file {
        suspensions.extend(read_suspensions_file(path)?);
    }
    for (i, raw) in args.suspensions.iter().enumerate() {
        suspensions.push(parse_suspension(raw)?.with_id(format!("arg-{}", i + 1)));
    }
    if !suspensions.is_empty() {
        request = request.with_suspensions(suspensions);
    }
    if args.no_end_of_day {
        request = request.with_end_of_day(false);
    }

    Ok(request)
}

fn print_report(
    request: &DeadlineRequest,
    breakdown: &DeadlineBreakdown,
    calendar: &str,
) -> Result<()> {
    let params = request.params();
    let mut rows = Vec::new();

    if let Some(t) = request.request_type() {
        rows.push(KeyValue::new("Request type", t.display_name()));
    }
    rows.push(KeyValue::new(
        "Term",
        format!("{} {}", breakdown.effective_amount, breakdown.unit),
    ));
    if params.double_term {
        rows.push(KeyValue::new("Double term", "yes"));
    }
    rows.push(KeyValue::new("Calendar", calendar));
    rows.push(KeyValue::new("Submitted", params.created_at.to_string()));
    rows.push(KeyValue::new(
        "Initial deadline",
        breakdown.initial_deadline.to_string(),
    ));
    rows.push(KeyValue::new("Deadline", breakdown.deadline.to_string()));

    print_header("Response Deadline");
    print_table(&rows)?;

    if !breakdown.applied.is_empty() {
        let suspensions: Vec<SuspensionRow> = breakdown
            .applied
            .iter()
            .map(|a| SuspensionRow {
                start: a.interval.start.to_string(),
                end: a.interval.end.to_string(),
                extension: format_extension(a.extension),
            })
            .collect();
        print_header("Suspensions");
        print_table(&suspensions)?;
    }

    if !breakdown.ignored.is_empty() {
        print_warning(&format!(
            "{} suspension(s) started after the deadline and were not applied",
            breakdown.ignored.len()
        ));
    }
    if !breakdown.discarded.is_empty() {
        print_warning(&format!(
            "{} suspension record(s) were invalid and discarded",
            breakdown.discarded.len()
        ));
    }

    Ok(())
}

fn format_extension(extension: Extension) -> String {
    match extension {
        Extension::Seconds(seconds) => {
            let (hours, rest) = (seconds / 3600, seconds % 3600);
            format!("{}h {:02}m", hours, rest / 60)
        }
        Extension::BusinessDays(1) => "1 business day".to_string(),
        Extension::BusinessDays(days) => format!("{} business days", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: DeadlineArgs,
    }

    fn args(argv: &[&str]) -> DeadlineArgs {
        let mut full = vec!["plazo"];
        full.extend_from_slice(argv);
        Wrapper::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_build_request_for_type() {
        let request = build_request(&args(&[
            "--type",
            "reclamo",
            "--created-at",
            "2024-01-15 10:00",
            "--double-term",
        ]))
        .unwrap();
        assert_eq!(request.request_type(), Some(RequestType::Reclamo));
        assert_eq!(request.params().effective_amount(), 30);
    }

    #[test]
    fn test_build_custom_request_with_suspensions() {
        let request = build_request(&args(&[
            "--unit",
            "hours",
            "--amount",
            "24",
            "--created-at",
            "2024-01-15 10:00",
            "-s",
            "2024-01-15 12:00..2024-01-15 15:30",
            "--no-end-of-day",
        ]))
        .unwrap();
        let params = request.params();
        assert_eq!(params.unit, TermUnit::Hours);
        assert_eq!(params.suspensions.len(), 1);
        assert_eq!(params.suspensions[0].id.as_deref(), Some("arg-1"));
        assert_eq!(params.approximate_end_of_day, Some(false));
    }

    #[test]
    fn test_build_request_errors() {
        assert!(matches!(
            build_request(&args(&["--created-at", "2024-01-15"])),
            Err(CliError::MissingArgument(_))
        ));
        assert!(matches!(
            build_request(&args(&["--type", "tutela", "--created-at", "2024-01-15"])),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            build_request(&args(&["-u", "weeks", "-a", "2", "--created-at", "2024-01-15"])),
            Err(CliError::Engine(_))
        ));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(format_extension(Extension::Seconds(12_600)), "3h 30m");
        assert_eq!(format_extension(Extension::BusinessDays(1)), "1 business day");
        assert_eq!(format_extension(Extension::BusinessDays(0)), "0 business days");
    }
}
