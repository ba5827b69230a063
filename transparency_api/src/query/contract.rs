use std::cmp::Ordering;

use url::Url;

use crate::types::{ContractStatus, CountryCode, GovernmentContract};

use super::common::{CountryScoped, Query, RecordFilter};

/// Constraints over government contracts. Results are ordered by amount,
/// largest first.
#[derive(Clone, Debug, Default)]
pub struct ContractQuery {
    pub status: Option<ContractStatus>,
    /// Inclusive lower bound on `amount`.
    pub min_amount: Option<f64>,
    /// Only meaningful for the all-countries view; stored uppercase.
    pub country: Option<CountryCode>,
}

impl Query for ContractQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(status) = self.status {
            url.query_pairs_mut()
                .append_pair("status", status.to_string().as_str());
        }
        if let Some(min_amount) = self.min_amount {
            url.query_pairs_mut()
                .append_pair("min_amount", &min_amount.to_string());
        }
        if let Some(country) = &self.country {
            url.query_pairs_mut().append_pair("country", country.as_str());
        }
        url
    }
}

impl RecordFilter for ContractQuery {
    type Record = GovernmentContract;

    fn matches(&self, contract: &GovernmentContract) -> bool {
        self.status.map_or(true, |status| contract.status == status)
            && self
                .min_amount
                .map_or(true, |min_amount| contract.amount >= min_amount)
    }

    fn compare(&self, a: &GovernmentContract, b: &GovernmentContract) -> Ordering {
        b.amount.total_cmp(&a.amount)
    }
}

impl CountryScoped for ContractQuery {
    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl ContractQuery {
    pub fn with_status(mut self, status: ContractStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_min_amount(mut self, min_amount: f64) -> Self {
        self.min_amount = Some(min_amount);
        self
    }

    /// Restricts to one country. The code is uppercased.
    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_uppercase());
        self
    }
}
