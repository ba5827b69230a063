//! Yearly metric histories (budget, CPI, health, education).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The yearly metric series kept per country.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Budget,
    Cpi,
    Health,
    Education,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Budget,
        Metric::Cpi,
        Metric::Health,
        Metric::Education,
    ];

    /// Path segment used by the REST API (`/countries/{code}/{segment}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Budget => "budget",
            Metric::Cpi => "cpi",
            Metric::Health => "health",
            Metric::Education => "education",
        }
    }

    /// Human label used in "not found" messages.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Budget => "Budget",
            Metric::Cpi => "CPI",
            Metric::Health => "Health",
            Metric::Education => "Education",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Metric::Budget),
            "cpi" => Ok(Metric::Cpi),
            "health" => Ok(Metric::Health),
            "education" => Ok(Metric::Education),
            _ => Err(()),
        }
    }
}

/// One year of a metric series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub year: i32,

    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Publisher of the figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// When the figure was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}
