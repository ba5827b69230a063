use serde::{Deserialize, Serialize};

use super::CountryCode;

/// A record lifted out of a per-country collection, carrying the code of the
/// country it was stored under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountryTagged<T> {
    pub country_code: CountryCode,

    #[serde(flatten)]
    pub record: T,
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}
