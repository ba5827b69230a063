//! Error types for the library layer.

use std::fmt;

use transparency_api::types::Metric;

use crate::store::FixtureError;

/// A per-country dataset that may be missing for a known country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    /// One of the yearly metric series.
    Metric(Metric),
    /// The year-keyed budget breakdowns, or one requested year of them.
    BudgetBreakdown,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric(metric) => write!(f, "{} data", metric.label()),
            Self::BudgetBreakdown => write!(f, "Budget breakdown"),
        }
    }
}

/// Errors produced by the library layer.
///
/// `CountryNotFound` and `DatasetNotFound` are deliberately distinct so a
/// caller can tell "no such country" from "country known, data absent".
#[derive(Debug)]
pub enum TransparencyError {
    /// The code does not match any known country.
    CountryNotFound,
    /// The country exists but has no entries for the requested dataset.
    DatasetNotFound(Dataset),
    /// A query parameter failed validation.
    InvalidInput(String),
    /// Fixture data could not be loaded.
    Fixture(FixtureError),
}

impl TransparencyError {
    /// True for either not-found kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CountryNotFound | Self::DatasetNotFound(_))
    }
}

impl fmt::Display for TransparencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountryNotFound => write!(f, "Country not found"),
            Self::DatasetNotFound(dataset) => write!(f, "{} not found", dataset),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Fixture(e) => write!(f, "Fixture error: {}", e),
        }
    }
}

impl std::error::Error for TransparencyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fixture(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FixtureError> for TransparencyError {
    fn from(e: FixtureError) -> Self {
        Self::Fixture(e)
    }
}
