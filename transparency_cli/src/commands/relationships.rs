use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use transparency_lib::{engine, FixtureStore};

use crate::output::{build_relationship_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct RelationshipsArgs {
    /// Only pairs that include this country
    #[arg(long)]
    pub country: Option<String>,
}

pub fn run(args: &RelationshipsArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    let relationships = match &args.country {
        Some(code) => engine::country_relationships(store, code)?,
        None => engine::relationships(store)
            .iter()
            .map(|(key, relationship)| (key.as_str(), relationship))
            .collect::<BTreeMap<_, _>>(),
    };
    print_output(
        &relationships,
        build_relationship_rows(&relationships),
        format,
    )
}
