mod commands;
mod config;
mod output;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "transparency")]
#[command(about = "Serve and query per-country government transparency data")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Directory holding the fixture JSON files; the built-in data when unset
    #[arg(long, env = "TRANSPARENCY_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// List countries or show one
    Countries(commands::countries::CountriesArgs),
    /// Current value or history of a yearly metric
    Metric(commands::metric::MetricArgs),
    /// Budget breakdown by sector
    Breakdown(commands::breakdown::BreakdownArgs),
    /// Diplomatic meetings
    Meetings(commands::meetings::MeetingsArgs),
    /// Bilateral relationship summaries
    Relationships(commands::relationships::RelationshipsArgs),
    /// Corruption cases
    Corruption(commands::corruption::CorruptionArgs),
    /// Government contracts
    Contracts(commands::contracts::ContractsArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on; defaults to 0.0.0.0:$PORT (PORT defaults to 8080)
    #[arg(long, env = "TRANSPARENCY_BIND")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("transparency=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format: OutputFormat = cli.output.parse()?;
    let store = config::load_store(cli.data_dir.as_deref())?;

    match &cli.command {
        Commands::Serve(args) => server::serve(store, config::resolve_bind(args.bind)).await?,
        Commands::Countries(args) => commands::countries::run(args, &store, format)?,
        Commands::Metric(args) => commands::metric::run(args, &store, format)?,
        Commands::Breakdown(args) => commands::breakdown::run(args, &store, format)?,
        Commands::Meetings(args) => commands::meetings::run(args, &store, format)?,
        Commands::Relationships(args) => commands::relationships::run(args, &store, format)?,
        Commands::Corruption(args) => commands::corruption::run(args, &store, format)?,
        Commands::Contracts(args) => commands::contracts::run(args, &store, format)?,
    }

    Ok(())
}
