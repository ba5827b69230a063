//! CLI subcommand implementations.

pub mod breakdown;
pub mod contracts;
pub mod corruption;
pub mod countries;
pub mod meetings;
pub mod metric;
pub mod relationships;
