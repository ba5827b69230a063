use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use transparency_lib::types::{
    BudgetBreakdown, ContractSummary, Country, CountryTagged, CorruptionCase, CorruptionSummary,
    GovernmentContract, Meeting, MetricRecord, Relationship,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => bail!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct CountryRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Budget")]
    #[serde(rename = "Budget")]
    budget: String,
    #[tabled(rename = "CPI")]
    #[serde(rename = "CPI")]
    cpi: String,
    #[tabled(rename = "Health/cap")]
    #[serde(rename = "Health/cap")]
    health_exp: String,
    #[tabled(rename = "Education/cap")]
    #[serde(rename = "Education/cap")]
    education_exp: String,
}

#[derive(Tabled, Serialize)]
pub struct MetricRow {
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
}

#[derive(Tabled, Serialize)]
pub struct SectorRow {
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Sector")]
    #[serde(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
pub struct MeetingRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    meeting_type: String,
    #[tabled(rename = "Countries")]
    #[serde(rename = "Countries")]
    countries: String,
    #[tabled(rename = "Topic")]
    #[serde(rename = "Topic")]
    topic: String,
}

#[derive(Tabled, Serialize)]
pub struct RelationshipRow {
    #[tabled(rename = "Pair")]
    #[serde(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Meetings")]
    #[serde(rename = "Meetings")]
    meetings: u32,
    #[tabled(rename = "Strength")]
    #[serde(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Topics")]
    #[serde(rename = "Topics")]
    topics: String,
    #[tabled(rename = "Last Meeting")]
    #[serde(rename = "Last Meeting")]
    last_meeting: String,
}

#[derive(Tabled, Serialize)]
pub struct CaseRow {
    #[tabled(rename = "Country")]
    #[serde(rename = "Country")]
    country: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Reported")]
    #[serde(rename = "Reported")]
    reported: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Severity")]
    #[serde(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
}

#[derive(Tabled, Serialize)]
pub struct ContractRow {
    #[tabled(rename = "Country")]
    #[serde(rename = "Country")]
    country: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Score")]
    #[serde(rename = "Score")]
    score: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
}

#[derive(Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "Measure")]
    #[serde(rename = "Measure")]
    measure: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

pub fn build_country_rows(countries: &[&Country]) -> Vec<CountryRow> {
    countries
        .iter()
        .map(|c| {
            let currency = c.currency.as_deref();
            CountryRow {
                code: c.code.clone(),
                name: c.name.clone(),
                region: c.region.clone().unwrap_or_default(),
                budget: format_amount(c.budget, currency),
                cpi: format!("{:.0}", c.cpi),
                health_exp: format_amount(c.health_exp, currency),
                education_exp: format_amount(c.education_exp, currency),
            }
        })
        .collect()
}

pub fn build_metric_rows(records: &[&MetricRecord]) -> Vec<MetricRow> {
    records
        .iter()
        .map(|r| MetricRow {
            year: r.year,
            value: format_amount(r.value, r.currency.as_deref()),
            source: r.source.clone().unwrap_or_default(),
        })
        .collect()
}

/// One row per sector, with its share of that year's total.
pub fn build_sector_rows(breakdowns: &[&BudgetBreakdown]) -> Vec<SectorRow> {
    breakdowns
        .iter()
        .flat_map(|b| {
            let shares = transparency_lib::analysis::sector_shares(b);
            b.sectors.iter().map(move |(sector, amount)| SectorRow {
                year: b.year,
                sector: sector.clone(),
                amount: format_amount(*amount, None),
                share: shares
                    .get(sector)
                    .map(|s| format!("{:.1}%", s))
                    .unwrap_or_default(),
            })
        })
        .collect()
}

pub fn build_meeting_rows(meetings: &[&Meeting]) -> Vec<MeetingRow> {
    meetings
        .iter()
        .map(|m| MeetingRow {
            id: m.id.clone(),
            date: m.date.to_string(),
            meeting_type: m.meeting_type.to_string(),
            countries: m.countries.join(", "),
            topic: m.topic.clone(),
        })
        .collect()
}

pub fn build_relationship_rows(relationships: &BTreeMap<&str, &Relationship>) -> Vec<RelationshipRow> {
    relationships
        .iter()
        .map(|(pair, r)| RelationshipRow {
            pair: pair.to_string(),
            meetings: r.meeting_count,
            strength: format!("{:.2}", r.relationship_strength),
            topics: r.common_topics.join(", "),
            last_meeting: r.last_meeting.map(|d| d.to_string()).unwrap_or_default(),
        })
        .collect()
}

pub fn build_case_rows(cases: &[CountryTagged<&CorruptionCase>]) -> Vec<CaseRow> {
    cases
        .iter()
        .map(|t| CaseRow {
            country: t.country_code.clone(),
            id: t.record.id.clone(),
            reported: t.record.date_reported.to_string(),
            status: t.record.status.to_string(),
            severity: t.record.severity.to_string(),
            amount: format_amount(t.record.amount_involved, Some(&t.record.currency)),
            title: t.record.title.clone(),
        })
        .collect()
}

pub fn build_contract_rows(contracts: &[CountryTagged<&GovernmentContract>]) -> Vec<ContractRow> {
    contracts
        .iter()
        .map(|t| ContractRow {
            country: t.country_code.clone(),
            id: t.record.id.clone(),
            status: t.record.status.to_string(),
            amount: format_amount(t.record.amount, Some(&t.record.currency)),
            score: t
                .record
                .transparency_score
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "-".to_string()),
            title: t.record.title.clone(),
        })
        .collect()
}

pub fn build_case_summary_rows(summary: &CorruptionSummary) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow {
        measure: "Total cases".to_string(),
        value: summary.total_cases.to_string(),
    }];
    for (severity, count) in &summary.by_severity {
        rows.push(SummaryRow {
            measure: format!("Severity: {}", severity),
            value: count.to_string(),
        });
    }
    for (status, count) in &summary.by_status {
        rows.push(SummaryRow {
            measure: format!("Status: {}", status),
            value: count.to_string(),
        });
    }
    for (currency, amount) in &summary.amount_involved_by_currency {
        rows.push(SummaryRow {
            measure: format!("Amount involved ({})", currency),
            value: format_amount(*amount, None),
        });
    }
    rows
}

pub fn build_contract_summary_rows(summary: &ContractSummary) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow {
        measure: "Total contracts".to_string(),
        value: summary.total_contracts.to_string(),
    }];
    for (status, count) in &summary.by_status {
        rows.push(SummaryRow {
            measure: format!("Status: {}", status),
            value: count.to_string(),
        });
    }
    for (currency, amount) in &summary.value_by_currency {
        rows.push(SummaryRow {
            measure: format!("Total value ({})", currency),
            value: format_amount(*amount, None),
        });
    }
    rows.push(SummaryRow {
        measure: "Average transparency".to_string(),
        value: format!("{:.1}", summary.average_transparency),
    });
    rows
}

// -- Rendering --

/// Prints `data` as JSON, or its rows in the other formats.
pub fn print_output<T, R>(data: &T, rows: Vec<R>, format: OutputFormat) -> Result<()>
where
    T: Serialize + ?Sized,
    R: Tabled + Serialize,
{
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => println!("{}", render_markdown(rows)),
        OutputFormat::Csv => print!("{}", render_csv(rows)?),
    }
    Ok(())
}

pub fn render_markdown<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    table.to_string()
}

pub fn render_csv<R: Serialize>(rows: Vec<R>) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Compact amount with an optional currency prefix, e.g. `BWP 6.2B`.
pub fn format_amount(value: f64, currency: Option<&str>) -> String {
    let abs = value.abs();
    let compact = if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    };
    match currency {
        Some(code) => format!("{} {}", code, compact),
        None => compact,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
