use chrono::{DateTime, NaiveDate};
use transparency_api::types::{CaseStatus, ContractStatus, MeetingType, Metric, Severity};

use crate::error::TransparencyError;

pub const MAX_TOPIC_LENGTH: usize = 100;
pub const MAX_COUNTRY_CODE_LENGTH: usize = 3;

/// Strip ASCII control characters (0x00-0x1F except space 0x20) and enforce a
/// byte-length limit. Surrounding spaces are kept; text that is only
/// whitespace is rejected.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, TransparencyError> {
    if input.len() > max_len {
        return Err(TransparencyError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect();
    if sanitized.trim().is_empty() {
        return Err(TransparencyError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a meeting topic fragment. Spaces are significant to the substring
/// match, so ` and` does not match `Bandwidth`.
pub fn validate_topic(input: &str) -> Result<String, TransparencyError> {
    sanitize_text(input, MAX_TOPIC_LENGTH)
}

/// Validate a country code filter: 2-3 ASCII letters, normalized to uppercase.
///
/// Only the shape is checked; whether the country exists is up to the caller.
pub fn validate_country_code(input: &str) -> Result<String, TransparencyError> {
    let trimmed = input.trim();
    if (2..=MAX_COUNTRY_CODE_LENGTH).contains(&trimmed.len())
        && trimmed.chars().all(|c| c.is_ascii_alphabetic())
    {
        Ok(trimmed.to_uppercase())
    } else {
        Err(TransparencyError::InvalidInput(format!(
            "invalid country code '{}'. Expected 2-3 letters (e.g., BW, us)",
            input
        )))
    }
}

/// Validate a year parameter: any integer. Bounds outside the stored years
/// simply match everything or nothing.
pub fn validate_year(input: &str) -> Result<i32, TransparencyError> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| {
        TransparencyError::InvalidInput(format!("invalid year '{}'. Expected e.g. 2023", trimmed))
    })
}

/// Validate a date bound. Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp,
/// of which only the calendar date is kept.
pub fn validate_date(input: &str) -> Result<NaiveDate, TransparencyError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| {
            TransparencyError::InvalidInput(format!(
                "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2023-03-14)",
                trimmed
            ))
        })
}

/// Validate a monetary threshold: any finite number.
pub fn validate_amount(input: &str) -> Result<f64, TransparencyError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(TransparencyError::InvalidInput(format!(
            "invalid amount '{}'. Expected a number (e.g., 1000000)",
            trimmed
        ))),
    }
}

/// Validate a meeting type: case-insensitive.
pub fn validate_meeting_type(input: &str) -> Result<MeetingType, TransparencyError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        TransparencyError::InvalidInput(format!(
            "unknown meeting type '{}'. Valid values: bilateral, multilateral",
            input
        ))
    })
}

/// Validate a corruption case status: case-insensitive.
pub fn validate_case_status(input: &str) -> Result<CaseStatus, TransparencyError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        TransparencyError::InvalidInput(format!(
            "unknown case status '{}'. Valid values: ongoing, resolved, closed",
            input
        ))
    })
}

/// Validate a severity: case-insensitive.
pub fn validate_severity(input: &str) -> Result<Severity, TransparencyError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        TransparencyError::InvalidInput(format!(
            "unknown severity '{}'. Valid values: low, medium, high, critical",
            input
        ))
    })
}

/// Validate a contract status: case-insensitive.
pub fn validate_contract_status(input: &str) -> Result<ContractStatus, TransparencyError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        TransparencyError::InvalidInput(format!(
            "unknown contract status '{}'. Valid values: ongoing, completed, cancelled",
            input
        ))
    })
}

/// Validate a metric name as used in paths and on the command line.
pub fn validate_metric(input: &str) -> Result<Metric, TransparencyError> {
    input.parse().map_err(|_| {
        TransparencyError::InvalidInput(format!(
            "unknown metric '{}'. Valid values: budget, cpi, health, education",
            input
        ))
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
