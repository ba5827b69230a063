use anyhow::Result;
use clap::Args;
use transparency_lib::params::YearRangeParams;
use transparency_lib::validation::validate_metric;
use transparency_lib::{engine, FixtureStore};

use crate::output::{build_metric_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct MetricArgs {
    /// Country code (case-insensitive)
    pub code: String,

    /// Metric: budget, cpi, health, education
    #[arg(default_value = "budget")]
    pub metric: String,

    /// Show the yearly series instead of the current value
    #[arg(long)]
    pub history: bool,

    /// First year of the series (inclusive)
    #[arg(long, requires = "history")]
    pub start_year: Option<String>,

    /// Last year of the series (inclusive)
    #[arg(long, requires = "history")]
    pub end_year: Option<String>,
}

pub fn run(args: &MetricArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    let metric = validate_metric(&args.metric)?;

    if !args.history {
        let current = engine::current_metric(store, &args.code, metric)?;
        return print_output(current, build_metric_rows(&[current]), format);
    }

    let query = YearRangeParams {
        start_year: args.start_year.clone(),
        end_year: args.end_year.clone(),
    }
    .to_history_query()?;
    let records = engine::metric_history(store, &args.code, metric, &query)?;
    if records.is_empty() {
        eprintln!("No {} records in the requested years", metric);
    }
    print_output(&records, build_metric_rows(&records), format)
}
