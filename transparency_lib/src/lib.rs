//! Library layer for the transparency data service: fixture store, country
//! resolution, the filter/sort engine, parameter validation, and summaries.
//!
//! Builds on the `transparency_api` crate, whose typed queries carry the
//! predicate and ordering of each record kind.

pub mod aggregate;
pub mod analysis;
pub mod engine;
pub mod error;
pub mod params;
pub mod resolver;
pub mod store;
pub mod validation;

pub use transparency_api;
pub use transparency_api::types;
pub use transparency_api::{
    BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, MeetingQuery,
    MetricHistoryQuery, Query, RecordFilter, YearBounded,
};

pub use error::{Dataset, TransparencyError};
pub use store::{FixtureError, FixtureStore};
