use anyhow::Result;
use clap::Args;
use transparency_lib::params::MeetingParams;
use transparency_lib::{engine, FixtureStore};

use crate::output::{build_meeting_rows, print_output, OutputFormat};

#[derive(Args)]
pub struct MeetingsArgs {
    /// Only meetings this country took part in
    #[arg(long)]
    pub country: Option<String>,

    /// Earliest meeting date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest meeting date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Case-insensitive fragment of the topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Meeting type: bilateral, multilateral
    #[arg(long = "type")]
    pub meeting_type: Option<String>,
}

pub fn run(args: &MeetingsArgs, store: &FixtureStore, format: OutputFormat) -> Result<()> {
    let query = MeetingParams {
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        topic: args.topic.clone(),
        meeting_type: args.meeting_type.clone(),
    }
    .to_query()?;

    let meetings = match &args.country {
        Some(code) => engine::country_meetings(store, code, &query)?,
        None => engine::meetings(store, &query),
    };
    eprintln!("{} meetings", meetings.len());
    print_output(&meetings, build_meeting_rows(&meetings), format)
}
