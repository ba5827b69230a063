//! Wire types, typed constraint sets, and an HTTP client for the
//! transparency data API.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{
    BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, CountryScoped,
    MeetingQuery, MetricHistoryQuery, Query, RecordFilter, YearBounded, YearRange,
};
