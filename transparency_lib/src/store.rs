//! Immutable in-memory fixture store.
//!
//! All seed collections are parsed once, checked for structural integrity, and
//! then only ever read. The store is shared between request handlers as an
//! `Arc<FixtureStore>`; nothing in it is mutable after construction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use thiserror::Error;
use transparency_api::types::{
    BudgetBreakdown, CorruptionCase, Country, CountryCode, GovernmentContract, Meeting, Metric,
    MetricRecord, Relationships,
};

pub const COUNTRIES_FILE: &str = "countries.json";
pub const BREAKDOWN_FILE: &str = "budget_breakdown.json";
pub const MEETINGS_FILE: &str = "meetings.json";
pub const RELATIONSHIPS_FILE: &str = "relationships.json";
pub const CORRUPTION_FILE: &str = "corruption_cases.json";
pub const CONTRACTS_FILE: &str = "contracts.json";

/// File holding the per-country series for `metric`.
pub fn history_file(metric: Metric) -> &'static str {
    match metric {
        Metric::Budget => "budget_history.json",
        Metric::Cpi => "cpi_history.json",
        Metric::Health => "health_history.json",
        Metric::Education => "education_history.json",
    }
}

/// Errors raised while building the store. Fatal at startup only.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse fixture {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Fixture integrity violation in {file}: {message}")]
    Integrity { file: &'static str, message: String },
}

/// Raw JSON text of every fixture file.
#[derive(Clone, Copy)]
pub struct FixtureSources<'a> {
    pub countries: &'a str,
    pub budget_history: &'a str,
    pub cpi_history: &'a str,
    pub health_history: &'a str,
    pub education_history: &'a str,
    pub budget_breakdown: &'a str,
    pub meetings: &'a str,
    pub relationships: &'a str,
    pub corruption_cases: &'a str,
    pub contracts: &'a str,
}

impl<'a> FixtureSources<'a> {
    /// The fixture set compiled into the binary.
    pub fn embedded() -> FixtureSources<'static> {
        FixtureSources {
            countries: include_str!("../../data/countries.json"),
            budget_history: include_str!("../../data/budget_history.json"),
            cpi_history: include_str!("../../data/cpi_history.json"),
            health_history: include_str!("../../data/health_history.json"),
            education_history: include_str!("../../data/education_history.json"),
            budget_breakdown: include_str!("../../data/budget_breakdown.json"),
            meetings: include_str!("../../data/meetings.json"),
            relationships: include_str!("../../data/relationships.json"),
            corruption_cases: include_str!("../../data/corruption_cases.json"),
            contracts: include_str!("../../data/contracts.json"),
        }
    }

    fn history(&self, metric: Metric) -> &'a str {
        match metric {
            Metric::Budget => self.budget_history,
            Metric::Cpi => self.cpi_history,
            Metric::Health => self.health_history,
            Metric::Education => self.education_history,
        }
    }
}

/// Read-only holder of every seed collection.
#[derive(Debug)]
pub struct FixtureStore {
    countries: Vec<Country>,
    histories: HashMap<Metric, HashMap<CountryCode, Vec<MetricRecord>>>,
    breakdowns: HashMap<CountryCode, HashMap<i32, BudgetBreakdown>>,
    meetings: Vec<Meeting>,
    relationships: Relationships,
    corruption: BTreeMap<CountryCode, Vec<CorruptionCase>>,
    contracts: BTreeMap<CountryCode, Vec<GovernmentContract>>,
}

static EMBEDDED: OnceCell<Arc<FixtureStore>> = OnceCell::new();

impl FixtureStore {
    /// Builds the store from the fixtures compiled into the binary.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_sources(FixtureSources::embedded())
    }

    /// Process-wide memoized copy of [`FixtureStore::embedded`].
    pub fn shared_embedded() -> Result<Arc<Self>, FixtureError> {
        EMBEDDED
            .get_or_try_init(|| Self::embedded().map(Arc::new))
            .cloned()
    }

    /// Reads every fixture file from `dir`.
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        let read = |name: &str| -> Result<String, FixtureError> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
        };
        let countries = read(COUNTRIES_FILE)?;
        let budget_history = read(history_file(Metric::Budget))?;
        let cpi_history = read(history_file(Metric::Cpi))?;
        let health_history = read(history_file(Metric::Health))?;
        let education_history = read(history_file(Metric::Education))?;
        let budget_breakdown = read(BREAKDOWN_FILE)?;
        let meetings = read(MEETINGS_FILE)?;
        let relationships = read(RELATIONSHIPS_FILE)?;
        let corruption_cases = read(CORRUPTION_FILE)?;
        let contracts = read(CONTRACTS_FILE)?;

        tracing::info!("Loading fixtures from {}", dir.display());
        Self::from_sources(FixtureSources {
            countries: &countries,
            budget_history: &budget_history,
            cpi_history: &cpi_history,
            health_history: &health_history,
            education_history: &education_history,
            budget_breakdown: &budget_breakdown,
            meetings: &meetings,
            relationships: &relationships,
            corruption_cases: &corruption_cases,
            contracts: &contracts,
        })
    }

    /// Parses and checks a full fixture set.
    pub fn from_sources(sources: FixtureSources<'_>) -> Result<Self, FixtureError> {
        let countries: Vec<Country> = parse(COUNTRIES_FILE, sources.countries)?;
        check_country_codes(&countries)?;
        let known: HashSet<&str> = countries.iter().map(|c| c.code.as_str()).collect();

        let mut histories = HashMap::new();
        for metric in Metric::ALL {
            let file = history_file(metric);
            let series: HashMap<CountryCode, Vec<MetricRecord>> =
                parse(file, sources.history(metric))?;
            for (code, records) in &series {
                check_series(file, code, records)?;
                warn_unknown(file, code, &known);
            }
            histories.insert(metric, series);
        }

        let raw_breakdowns: HashMap<CountryCode, HashMap<i32, BudgetBreakdown>> =
            parse(BREAKDOWN_FILE, sources.budget_breakdown)?;
        let mut breakdowns = HashMap::with_capacity(raw_breakdowns.len());
        for (code, by_year) in raw_breakdowns {
            warn_unknown(BREAKDOWN_FILE, &code, &known);
            let mut keyed = HashMap::with_capacity(by_year.len());
            for (year, mut breakdown) in by_year {
                if breakdown.year != 0 && breakdown.year != year {
                    return Err(FixtureError::Integrity {
                        file: BREAKDOWN_FILE,
                        message: format!(
                            "{} breakdown keyed {} declares year {}",
                            code, year, breakdown.year
                        ),
                    });
                }
                breakdown.year = year;
                if !totals_agree(&breakdown) {
                    tracing::warn!(
                        "{}: {} {} total {} differs from sector sum {}",
                        BREAKDOWN_FILE,
                        code,
                        year,
                        breakdown.total,
                        breakdown.sector_sum()
                    );
                }
                keyed.insert(year, breakdown);
            }
            breakdowns.insert(code, keyed);
        }

        let meetings: Vec<Meeting> = parse(MEETINGS_FILE, sources.meetings)?;
        if let Some(meeting) = meetings.iter().find(|m| m.countries.len() < 2) {
            return Err(FixtureError::Integrity {
                file: MEETINGS_FILE,
                message: format!("meeting {} has fewer than two countries", meeting.id),
            });
        }

        let relationships: Relationships = parse(RELATIONSHIPS_FILE, sources.relationships)?;

        let corruption: BTreeMap<CountryCode, Vec<CorruptionCase>> =
            parse(CORRUPTION_FILE, sources.corruption_cases)?;
        for code in corruption.keys() {
            warn_unknown(CORRUPTION_FILE, code, &known);
        }

        let contracts: BTreeMap<CountryCode, Vec<GovernmentContract>> =
            parse(CONTRACTS_FILE, sources.contracts)?;
        for code in contracts.keys() {
            warn_unknown(CONTRACTS_FILE, code, &known);
        }

        tracing::info!(
            "Fixture store ready: {} countries, {} meetings, {} relationships",
            countries.len(),
            meetings.len(),
            relationships.len()
        );

        Ok(Self {
            countries,
            histories,
            breakdowns,
            meetings,
            relationships,
            corruption,
            contracts,
        })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Exact (already normalized) code lookup. Use [`crate::resolver::resolve`]
    /// for user input.
    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    /// The stored series for one country, in stored order.
    pub fn history(&self, metric: Metric, code: &str) -> Option<&[MetricRecord]> {
        self.histories
            .get(&metric)
            .and_then(|series| series.get(code))
            .map(Vec::as_slice)
    }

    /// One country's breakdowns keyed by year. Iteration order is unspecified.
    pub fn breakdowns(&self, code: &str) -> Option<&HashMap<i32, BudgetBreakdown>> {
        self.breakdowns.get(code)
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn corruption_cases(&self) -> &BTreeMap<CountryCode, Vec<CorruptionCase>> {
        &self.corruption
    }

    pub fn contracts(&self) -> &BTreeMap<CountryCode, Vec<GovernmentContract>> {
        &self.contracts
    }
}

fn parse<T: DeserializeOwned>(file: &'static str, text: &str) -> Result<T, FixtureError> {
    serde_json::from_str(text).map_err(|source| FixtureError::Parse { file, source })
}

fn check_country_codes(countries: &[Country]) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for country in countries {
        if country.code.is_empty() || country.code != country.code.to_uppercase() {
            return Err(FixtureError::Integrity {
                file: COUNTRIES_FILE,
                message: format!("country code '{}' is not uppercase", country.code),
            });
        }
        if !seen.insert(country.code.as_str()) {
            return Err(FixtureError::Integrity {
                file: COUNTRIES_FILE,
                message: format!("duplicate country code '{}'", country.code),
            });
        }
    }
    Ok(())
}

/// Years must be unique. Out-of-order series are accepted but reported,
/// because the current value is read from the last stored entry.
fn check_series(
    file: &'static str,
    code: &str,
    records: &[MetricRecord],
) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.year) {
            return Err(FixtureError::Integrity {
                file,
                message: format!("{} lists year {} more than once", code, record.year),
            });
        }
    }
    if records.windows(2).any(|w| w[0].year > w[1].year) {
        tracing::warn!(
            "{}: series for {} is not ascending by year; current value uses the last entry",
            file,
            code
        );
    }
    Ok(())
}

/// Sector amounts may be rounded; anything within 1% of `total` passes.
fn totals_agree(breakdown: &BudgetBreakdown) -> bool {
    (breakdown.sector_sum() - breakdown.total).abs() <= breakdown.total.abs() * 0.01
}

fn warn_unknown(file: &str, code: &str, known: &HashSet<&str>) {
    if !known.contains(code) {
        tracing::warn!("{}: data keyed by unknown country '{}'", file, code);
    }
}
