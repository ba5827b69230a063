//! Raw query-string parameters and their conversion into typed queries.
//!
//! Parameters arrive as optional strings. A missing or empty value leaves the
//! constraint unset; anything else must validate or the whole request fails
//! with [`TransparencyError::InvalidInput`].

use serde::Deserialize;
use transparency_api::{
    BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, MeetingQuery,
    MetricHistoryQuery, YearRange,
};

use crate::error::TransparencyError;
use crate::validation::{
    validate_amount, validate_case_status, validate_contract_status, validate_country_code,
    validate_date, validate_meeting_type, validate_severity, validate_topic, validate_year,
};

/// Runs `validate` on the raw value when it is present and non-blank.
fn parse_opt<T>(
    value: &Option<String>,
    validate: impl Fn(&str) -> Result<T, TransparencyError>,
) -> Result<Option<T>, TransparencyError> {
    match value.as_deref() {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => validate(v).map(Some),
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct YearRangeParams {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

impl YearRangeParams {
    fn to_range(&self) -> Result<YearRange, TransparencyError> {
        Ok(YearRange {
            start_year: parse_opt(&self.start_year, validate_year)?,
            end_year: parse_opt(&self.end_year, validate_year)?,
        })
    }

    pub fn to_history_query(&self) -> Result<MetricHistoryQuery, TransparencyError> {
        Ok(MetricHistoryQuery {
            range: self.to_range()?,
        })
    }

    pub fn to_breakdown_history_query(&self) -> Result<BreakdownHistoryQuery, TransparencyError> {
        Ok(BreakdownHistoryQuery {
            range: self.to_range()?,
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct BreakdownParams {
    pub year: Option<String>,
}

impl BreakdownParams {
    pub fn to_query(&self) -> Result<BreakdownQuery, TransparencyError> {
        Ok(BreakdownQuery {
            year: parse_opt(&self.year, validate_year)?,
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MeetingParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub topic: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: Option<String>,
}

impl MeetingParams {
    pub fn to_query(&self) -> Result<MeetingQuery, TransparencyError> {
        Ok(MeetingQuery {
            start_date: parse_opt(&self.start_date, validate_date)?,
            end_date: parse_opt(&self.end_date, validate_date)?,
            topic: parse_opt(&self.topic, validate_topic)?,
            meeting_type: parse_opt(&self.meeting_type, validate_meeting_type)?,
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct CorruptionParams {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub country: Option<String>,
}

impl CorruptionParams {
    pub fn to_query(&self) -> Result<CorruptionQuery, TransparencyError> {
        Ok(CorruptionQuery {
            status: parse_opt(&self.status, validate_case_status)?,
            severity: parse_opt(&self.severity, validate_severity)?,
            country: parse_opt(&self.country, validate_country_code)?,
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ContractParams {
    pub status: Option<String>,
    pub min_amount: Option<String>,
    pub country: Option<String>,
}

impl ContractParams {
    pub fn to_query(&self) -> Result<ContractQuery, TransparencyError> {
        Ok(ContractQuery {
            status: parse_opt(&self.status, validate_contract_status)?,
            min_amount: parse_opt(&self.min_amount, validate_amount)?,
            country: parse_opt(&self.country, validate_country_code)?,
        })
    }
}
