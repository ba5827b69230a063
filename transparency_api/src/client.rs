//! HTTP client for the transparency data REST API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{
        BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, MeetingQuery,
        MetricHistoryQuery, Query,
    },
    types::{
        BudgetBreakdown, ContractSummary, CorruptionCase, CorruptionSummary, Country,
        CountrySummary, CountryTagged, ErrorBody, GovernmentContract, HealthStatus, Meeting,
        Metric, MetricRecord, Relationships,
    },
    Error,
};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// HTTP client for the transparency data API.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
/// A 404 is surfaced as [`Error::NotFound`] carrying the server's message, so
/// callers can tell "Country not found" from "Budget data not found".
pub struct Client {
    /// Base URL of the service, e.g. `http://localhost:8080`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at a locally running service.
    pub fn new() -> Self {
        Self {
            base_api_url: "http://localhost:8080".to_string(),
        }
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    fn get_url(&self, segments: &[&str], query: Option<&dyn Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T>(&self, segments: &[&str], query: Option<&dyn Query>) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(segments, query)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("transparency-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == StatusCode::NOT_FOUND {
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                tracing::debug!("Resource not found: {}", err.error);
                return Err(Error::NotFound { message: err.error });
            }
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Liveness probe.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get(&["health"], None).await
    }

    /// Lists every country as `{code, name}`.
    pub async fn get_countries(&self) -> Result<Vec<CountrySummary>, Error> {
        self.get(&["countries"], None).await
    }

    /// Fetches a single country. The code is matched case-insensitively by the server.
    pub async fn get_country(&self, code: &str) -> Result<Country, Error> {
        self.get(&["countries", code], None).await
    }

    /// Fetches the current (latest stored) value of a metric.
    pub async fn get_metric(&self, code: &str, metric: Metric) -> Result<MetricRecord, Error> {
        self.get(&["countries", code, metric.as_str()], None).await
    }

    /// Fetches a metric series, optionally narrowed to a year window.
    pub async fn get_metric_history(
        &self,
        code: &str,
        metric: Metric,
        query: &MetricHistoryQuery,
    ) -> Result<Vec<MetricRecord>, Error> {
        self.get(&["countries", code, metric.as_str(), "history"], Some(query))
            .await
    }

    /// Fetches the breakdown for `query.year`, or the latest year when unset.
    pub async fn get_budget_breakdown(
        &self,
        code: &str,
        query: &BreakdownQuery,
    ) -> Result<BudgetBreakdown, Error> {
        self.get(&["countries", code, "budget", "breakdown"], Some(query))
            .await
    }

    /// Fetches every breakdown in the year window, ascending by year.
    pub async fn get_budget_breakdown_history(
        &self,
        code: &str,
        query: &BreakdownHistoryQuery,
    ) -> Result<Vec<BudgetBreakdown>, Error> {
        self.get(
            &["countries", code, "budget", "breakdown", "history"],
            Some(query),
        )
        .await
    }

    /// Lists meetings matching the query.
    pub async fn get_meetings(&self, query: &MeetingQuery) -> Result<Vec<Meeting>, Error> {
        self.get(&["meetings"], Some(query)).await
    }

    /// Lists meetings a country took part in, narrowed by the query.
    pub async fn get_country_meetings(
        &self,
        code: &str,
        query: &MeetingQuery,
    ) -> Result<Vec<Meeting>, Error> {
        self.get(&["countries", code, "meetings"], Some(query))
            .await
    }

    /// Fetches every relationship summary.
    pub async fn get_relationships(&self) -> Result<Relationships, Error> {
        self.get(&["relationships"], None).await
    }

    /// Fetches the relationship summaries involving one country.
    pub async fn get_country_relationships(&self, code: &str) -> Result<Relationships, Error> {
        self.get(&["countries", code, "relationships"], None).await
    }

    /// Lists corruption cases across all countries, newest first.
    pub async fn get_corruption_cases(
        &self,
        query: &CorruptionQuery,
    ) -> Result<Vec<CountryTagged<CorruptionCase>>, Error> {
        self.get(&["corruption"], Some(query)).await
    }

    /// Summarizes the corruption cases matching the query.
    pub async fn get_corruption_summary(
        &self,
        query: &CorruptionQuery,
    ) -> Result<CorruptionSummary, Error> {
        self.get(&["corruption", "summary"], Some(query)).await
    }

    /// Lists one country's corruption cases, newest first. The query's
    /// `country` field is ignored in favour of `code`.
    pub async fn get_country_corruption_cases(
        &self,
        code: &str,
        query: &CorruptionQuery,
    ) -> Result<Vec<CorruptionCase>, Error> {
        self.get(&["countries", code, "corruption"], Some(query))
            .await
    }

    /// Lists contracts across all countries, largest first.
    pub async fn get_contracts(
        &self,
        query: &ContractQuery,
    ) -> Result<Vec<CountryTagged<GovernmentContract>>, Error> {
        self.get(&["contracts"], Some(query)).await
    }

    /// Summarizes the contracts matching the query.
    pub async fn get_contract_summary(
        &self,
        query: &ContractQuery,
    ) -> Result<ContractSummary, Error> {
        self.get(&["contracts", "summary"], Some(query)).await
    }

    /// Lists one country's contracts, largest first.
    pub async fn get_country_contracts(
        &self,
        code: &str,
        query: &ContractQuery,
    ) -> Result<Vec<GovernmentContract>, Error> {
        self.get(&["countries", code, "contracts"], Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
