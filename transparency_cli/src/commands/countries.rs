use anyhow::Result;
use clap::Args;
use transparency_lib::{engine, FixtureStore};

use crate::output::{build_country_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct CountriesArgs {
    /// Show one country by code (case-insensitive, e.g. bw)
    #[arg(long)]
    pub code: Option<String>,
}

pub fn run(args: &CountriesArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    if let Some(code) = &args.code {
        let country = engine::country(store, code)?;
        return print_output(country, build_country_rows(&[country]), format);
    }

    let countries: Vec<_> = store.countries().iter().collect();
    print_output(
        &engine::list_countries(store),
        build_country_rows(&countries),
        format,
    )
}
