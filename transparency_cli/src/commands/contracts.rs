use anyhow::Result;
use clap::Args;
use transparency_lib::analysis::summarize_contracts;
use transparency_lib::params::ContractParams;
use transparency_lib::types::CountryTagged;
use transparency_lib::{engine, resolver, FixtureStore};

use crate::output::{build_contract_rows, build_contract_summary_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct ContractsArgs {
    /// Only contracts from this country
    #[arg(long)]
    pub country: Option<String>,

    /// Contract status: ongoing, completed, cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// Minimum contract amount (inclusive)
    #[arg(long)]
    pub min_amount: Option<String>,

    /// Print counts, totals and the average transparency score
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: &ContractsArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    let query = ContractParams {
        status: args.status.clone(),
        min_amount: args.min_amount.clone(),
        country: None,
    }
    .to_query()?;

    let contracts = match &args.country {
        Some(code) => {
            let country = resolver::resolve(store, code)?;
            engine::country_contracts(store, &country.code, &query)?
                .into_iter()
                .map(|record| CountryTagged {
                    country_code: country.code.clone(),
                    record,
                })
                .collect::<Vec<_>>()
        }
        None => engine::contracts(store, &query),
    };

    if args.summary {
        let summary = summarize_contracts(contracts.iter().map(|t| t.record));
        return print_output(&summary, build_contract_summary_rows(&summary), format);
    }
    print_output(&contracts, build_contract_rows(&contracts), format)
}
