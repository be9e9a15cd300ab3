//! Calendar command: check dates against the configured business calendar.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use plazo_config::EngineSettings;
use plazo_core::calendars::Calendar;
use plazo_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_json, print_rows, print_success, print_warning};

/// Arguments for the calendar command.
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Date to check (YYYY-MM-DD)
    #[arg(short, long, conflicts_with = "year")]
    pub date: Option<String>,

    /// With --date, also show the date this many business days later
    #[arg(long, requires = "date")]
    pub add: Option<u32>,

    /// List the weekday holidays of a year
    #[arg(short, long)]
    pub year: Option<i32>,
}

/// Result of checking a single date.
#[derive(Debug, Serialize)]
pub struct DateCheck {
    pub calendar: String,
    pub date: Date,
    pub business_day: bool,
    pub next_business_day: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_business_days: Option<(u32, Date)>,
}

/// A holiday row.
#[derive(Debug, Serialize, Tabled)]
pub struct HolidayRow {
    #[tabled(rename = "Date")]
    pub date: Date,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
}

/// Execute the calendar command.
pub fn execute(args: CalendarArgs, settings: &EngineSettings, format: OutputFormat) -> Result<()> {
    let calendar = settings.build_calendar()?;

    match (&args.date, args.year) {
        (Some(date), _) => {
            let check = check_date(calendar.as_ref(), parse_date(date)?, args.add)?;
            print_check(&check, format)
        }
        (None, Some(year)) => {
            let rows: Vec<HolidayRow> = calendar
                .holidays_in_year(year)
                .into_iter()
                .map(|date| HolidayRow {
                    date,
                    weekday: date.weekday().to_string(),
                })
                .collect();
            if format == OutputFormat::Table {
                print_header(&format!("{} holidays {}", calendar.name(), year));
            }
            print_rows(&rows, format, |r| r.date.to_string())
        }
        (None, None) => Err(CliError::MissingArgument("--date or --year".to_string()).into()),
    }
}

/// Checks a date and optionally advances it.
pub fn check_date(
    calendar: &dyn Calendar,
    date: Date,
    add: Option<u32>,
) -> CliResult<DateCheck> {
    let plus_business_days = match add {
        Some(n) => Some((n, calendar.add_business_days(date, n)?)),
        None => None,
    };
    Ok(DateCheck {
        calendar: calendar.name().to_string(),
        date,
        business_day: calendar.is_business_day(date),
        next_business_day: calendar.next_business_day(date)?,
        plus_business_days,
    })
}

fn print_check(check: &DateCheck, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(check)?,
        OutputFormat::Minimal => println!("{}", check.business_day),
        OutputFormat::Table => {
            if check.business_day {
                print_success(&format!("{} is a business day ({})", check.date, check.calendar));
            } else {
                print_warning(&format!(
                    "{} is not a business day ({})",
                    check.date, check.calendar
                ));
            }
            print_info(&format!("Next business day: {}", check.next_business_day));
            if let Some((n, date)) = check.plus_business_days {
                print_info(&format!("{} business days later: {}", n, date));
            }
        }
    }
    Ok(())
}
