//! Country records and their list summary.

use serde::{Deserialize, Serialize};

/// Uppercase ISO-style country code (e.g. "BW").
pub type CountryCode = String;

/// Full country record with the current-year scalar metrics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    /// Unique uppercase code.
    pub code: CountryCode,

    pub name: String,

    /// Current-year national budget, in the country's currency.
    pub budget: f64,

    /// Current Corruption Perception Index score (0-100).
    pub cpi: f64,

    /// Health expenditure per capita.
    pub health_exp: f64,

    /// Education expenditure per capita.
    pub education_exp: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Entry returned by the country list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountrySummary {
    pub code: CountryCode,
    pub name: String,
}

impl From<&Country> for CountrySummary {
    fn from(country: &Country) -> Self {
        CountrySummary {
            code: country.code.clone(),
            name: country.name.clone(),
        }
    }
}
