use anyhow::Result;
use clap::Args;
use transparency_lib::analysis::summarize_cases;
use transparency_lib::params::CorruptionParams;
use transparency_lib::types::CountryTagged;
use transparency_lib::{engine, resolver, FixtureStore};

use crate::output::{build_case_rows, build_case_summary_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct CorruptionArgs {
    /// Only cases from this country
    #[arg(long)]
    pub country: Option<String>,

    /// Case status: ongoing, resolved, closed
    #[arg(long)]
    pub status: Option<String>,

    /// Severity: low, medium, high, critical
    #[arg(long)]
    pub severity: Option<String>,

    /// Print counts and totals instead of the cases
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: &CorruptionArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    let query = CorruptionParams {
        status: args.status.clone(),
        severity: args.severity.clone(),
        country: None,
    }
    .to_query()?;

    let cases = match &args.country {
        Some(code) => {
            let country = resolver::resolve(store, code)?;
            engine::country_corruption_cases(store, &country.code, &query)?
                .into_iter()
                .map(|record| CountryTagged {
                    country_code: country.code.clone(),
                    record,
                })
                .collect::<Vec<_>>()
        }
        None => engine::corruption_cases(store, &query),
    };

    if args.summary {
        let summary = summarize_cases(cases.iter().map(|t| t.record));
        return print_output(&summary, build_case_summary_rows(&summary), format);
    }
    print_output(&cases, build_case_rows(&cases), format)
}
