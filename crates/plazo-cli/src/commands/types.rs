//! Types command: the request catalog.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use plazo_config::RequestType;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_rows};

/// Arguments for the types command.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Show descriptions
    #[arg(short = 'l', long)]
    pub long: bool,
}

/// One catalog entry.
#[derive(Debug, Serialize, Tabled)]
pub struct TypeRow {
    #[tabled(rename = "Id")]
    pub id: &'static str,
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "Term")]
    pub term: String,
    #[tabled(skip)]
    pub amount: u32,
    #[tabled(skip)]
    pub unit: String,
    #[tabled(skip)]
    pub description: &'static str,
}

impl From<RequestType> for TypeRow {
    fn from(t: RequestType) -> Self {
        let term = t.term();
        Self {
            id: t.id(),
            name: t.display_name(),
            term: term.to_string(),
            amount: term.amount,
            unit: term.unit.to_string(),
            description: t.description(),
        }
    }
}

/// Description row for the long listing.
#[derive(Debug, Serialize, Tabled)]
struct DescribedRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Term")]
    term: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// Execute the types command.
pub fn execute(args: TypesArgs, format: OutputFormat) -> Result<()> {
    let rows: Vec<TypeRow> = RequestType::ALL.into_iter().map(TypeRow::from).collect();

    if format == OutputFormat::Table {
        print_header("Request Types");
    }

    if args.long && format == OutputFormat::Table {
        let described: Vec<DescribedRow> = rows
            .into_iter()
            .map(|r| DescribedRow {
                id: r.id,
                term: r.term,
                description: r.description,
            })
            .collect();
        return crate::output::print_table(&described);
    }

    print_rows(&rows, format, |r| r.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_type() {
        let row = TypeRow::from(RequestType::SaludRiesgoPriorizado);
        assert_eq!(row.id, "salud_riesgo_priorizado");
        assert_eq!(row.term, "48 hours");
        assert_eq!(row.unit, "hours");
        assert_eq!(row.amount, 48);
    }
}
