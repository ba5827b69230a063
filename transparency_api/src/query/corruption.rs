use std::cmp::Ordering;

use url::Url;

use crate::types::{CaseStatus, CorruptionCase, CountryCode, Severity};

use super::common::{CountryScoped, Query, RecordFilter};

/// Constraints over corruption cases. Results are ordered by
/// `date_reported`, most recent first.
#[derive(Clone, Debug, Default)]
pub struct CorruptionQuery {
    pub status: Option<CaseStatus>,
    pub severity: Option<Severity>,
    /// Only meaningful for the all-countries view; stored uppercase.
    pub country: Option<CountryCode>,
}

impl Query for CorruptionQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(status) = self.status {
            url.query_pairs_mut()
                .append_pair("status", status.to_string().as_str());
        }
        if let Some(severity) = self.severity {
            url.query_pairs_mut()
                .append_pair("severity", severity.to_string().as_str());
        }
        if let Some(country) = &self.country {
            url.query_pairs_mut().append_pair("country", country.as_str());
        }
        url
    }
}

impl RecordFilter for CorruptionQuery {
    type Record = CorruptionCase;

    fn matches(&self, case: &CorruptionCase) -> bool {
        self.status.map_or(true, |status| case.status == status)
            && self.severity.map_or(true, |severity| case.severity == severity)
    }

    fn compare(&self, a: &CorruptionCase, b: &CorruptionCase) -> Ordering {
        b.date_reported.cmp(&a.date_reported)
    }
}

impl CountryScoped for CorruptionQuery {
    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl CorruptionQuery {
    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Restricts to one country. The code is uppercased.
    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_uppercase());
        self
    }
}
