use anyhow::Result;
use clap::Args;
use transparency_lib::params::{BreakdownParams, YearRangeParams};
use transparency_lib::{engine, FixtureStore};

use crate::output::{build_sector_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct BreakdownArgs {
    /// Country code (case-insensitive)
    pub code: String,

    /// Fiscal year; the latest available year when omitted
    #[arg(long, conflicts_with = "history")]
    pub year: Option<String>,

    /// Show every year instead of one
    #[arg(long)]
    pub history: bool,

    /// First year of the history (inclusive)
    #[arg(long, requires = "history")]
    pub start_year: Option<String>,

    /// Last year of the history (inclusive)
    #[arg(long, requires = "history")]
    pub end_year: Option<String>,
}

pub fn run(args: &BreakdownArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    if args.history {
        let query = YearRangeParams {
            start_year: args.start_year.clone(),
            end_year: args.end_year.clone(),
        }
        .to_breakdown_history_query()?;
        let breakdowns = engine::breakdown_history(store, &args.code, &query)?;
        return print_output(&breakdowns, build_sector_rows(&breakdowns), format);
    }

    let query = BreakdownParams {
        year: args.year.clone(),
    }
    .to_query()?;
    let breakdown = engine::budget_breakdown(store, &args.code, &query)?;
    print_output(breakdown, build_sector_rows(&[breakdown]), format)
}
