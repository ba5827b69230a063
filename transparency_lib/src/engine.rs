//! Query operations over the fixture store.
//!
//! Every function is pure: it borrows from the store, applies one constraint
//! set, and returns a derived, ordered view. Country codes from callers go
//! through [`crate::resolver::resolve`], so they are matched case-insensitively.

use std::collections::BTreeMap;

use transparency_api::types::{
    BudgetBreakdown, Country, CountrySummary, CountryTagged, CorruptionCase, GovernmentContract,
    Meeting, Metric, MetricRecord, Relationship, Relationships,
};
use transparency_api::{
    BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, CountryScoped,
    MeetingQuery, MetricHistoryQuery, RecordFilter,
};

use crate::aggregate::flatten_with_country_tag;
use crate::error::{Dataset, TransparencyError};
use crate::resolver::resolve;
use crate::store::FixtureStore;

/// Code and name of every country, in stored order.
pub fn list_countries(store: &FixtureStore) -> Vec<CountrySummary> {
    store.countries().iter().map(CountrySummary::from).collect()
}

/// Full record for one country.
pub fn country<'a>(store: &'a FixtureStore, code: &str) -> Result<&'a Country, TransparencyError> {
    resolve(store, code)
}

/// Current value of `metric`: the last entry of the stored series.
///
/// Series are stored ascending, so this is the most recent year; the store
/// warns at load time when a series is out of order.
pub fn current_metric<'a>(
    store: &'a FixtureStore,
    code: &str,
    metric: Metric,
) -> Result<&'a MetricRecord, TransparencyError> {
    series(store, code, metric)?
        .last()
        .ok_or(TransparencyError::DatasetNotFound(Dataset::Metric(metric)))
}

/// The stored series for `metric`, restricted to the query's year window.
pub fn metric_history<'a>(
    store: &'a FixtureStore,
    code: &str,
    metric: Metric,
    query: &MetricHistoryQuery,
) -> Result<Vec<&'a MetricRecord>, TransparencyError> {
    let records = query.apply(series(store, code, metric)?);
    tracing::debug!("{} {} history: {} records", code, metric, records.len());
    Ok(records)
}

fn series<'a>(
    store: &'a FixtureStore,
    code: &str,
    metric: Metric,
) -> Result<&'a [MetricRecord], TransparencyError> {
    let country = resolve(store, code)?;
    store
        .history(metric, &country.code)
        .filter(|records| !records.is_empty())
        .ok_or(TransparencyError::DatasetNotFound(Dataset::Metric(metric)))
}

/// One year's breakdown, or the latest year when the query has none.
pub fn budget_breakdown<'a>(
    store: &'a FixtureStore,
    code: &str,
    query: &BreakdownQuery,
) -> Result<&'a BudgetBreakdown, TransparencyError> {
    let country = resolve(store, code)?;
    let by_year = store
        .breakdowns(&country.code)
        .ok_or(TransparencyError::DatasetNotFound(Dataset::BudgetBreakdown))?;
    query
        .apply(by_year.values())
        .first()
        .copied()
        .ok_or(TransparencyError::DatasetNotFound(Dataset::BudgetBreakdown))
}

/// Breakdowns in the query's year window, ascending by year.
pub fn breakdown_history<'a>(
    store: &'a FixtureStore,
    code: &str,
    query: &BreakdownHistoryQuery,
) -> Result<Vec<&'a BudgetBreakdown>, TransparencyError> {
    let country = resolve(store, code)?;
    let by_year = store
        .breakdowns(&country.code)
        .filter(|by_year| !by_year.is_empty())
        .ok_or(TransparencyError::DatasetNotFound(Dataset::BudgetBreakdown))?;
    let breakdowns = query.apply(by_year.values());
    tracing::debug!("{} breakdown history: {} years", country.code, breakdowns.len());
    Ok(breakdowns)
}

/// All meetings matching the query, in stored order.
pub fn meetings<'a>(store: &'a FixtureStore, query: &MeetingQuery) -> Vec<&'a Meeting> {
    let meetings = query.apply(store.meetings());
    tracing::debug!("meetings: {} matched", meetings.len());
    meetings
}

/// Meetings the country took part in, then the query's constraints.
pub fn country_meetings<'a>(
    store: &'a FixtureStore,
    code: &str,
    query: &MeetingQuery,
) -> Result<Vec<&'a Meeting>, TransparencyError> {
    let country = resolve(store, code)?;
    let meetings = query.apply(
        store
            .meetings()
            .iter()
            .filter(|meeting| meeting.involves(&country.code)),
    );
    tracing::debug!("{} meetings: {} matched", country.code, meetings.len());
    Ok(meetings)
}

pub fn relationships(store: &FixtureStore) -> &Relationships {
    store.relationships()
}

/// True when one of the `-`-separated codes in `key` is `code`.
pub fn relationship_key_involves(key: &str, code: &str) -> bool {
    key.split('-').any(|token| token == code)
}

/// Relationships whose key names the country.
pub fn country_relationships<'a>(
    store: &'a FixtureStore,
    code: &str,
) -> Result<BTreeMap<&'a str, &'a Relationship>, TransparencyError> {
    let country = resolve(store, code)?;
    Ok(store
        .relationships()
        .iter()
        .filter(|(key, _)| relationship_key_involves(key, &country.code))
        .map(|(key, relationship)| (key.as_str(), relationship))
        .collect())
}

/// Cases across all countries, each tagged with its country, newest first.
pub fn corruption_cases<'a>(
    store: &'a FixtureStore,
    query: &CorruptionQuery,
) -> Vec<CountryTagged<&'a CorruptionCase>> {
    let cases = filter_tagged(store.corruption_cases(), query);
    tracing::debug!("corruption cases: {} matched", cases.len());
    cases
}

/// One country's cases, newest first. A known country without cases yields
/// an empty list. The path country always wins over any country constraint.
pub fn country_corruption_cases<'a>(
    store: &'a FixtureStore,
    code: &str,
    query: &CorruptionQuery,
) -> Result<Vec<&'a CorruptionCase>, TransparencyError> {
    let country = resolve(store, code)?;
    Ok(match store.corruption_cases().get(&country.code) {
        Some(cases) => query.apply(cases),
        None => Vec::new(),
    })
}

/// Contracts across all countries, each tagged with its country, largest first.
pub fn contracts<'a>(
    store: &'a FixtureStore,
    query: &ContractQuery,
) -> Vec<CountryTagged<&'a GovernmentContract>> {
    let contracts = filter_tagged(store.contracts(), query);
    tracing::debug!("contracts: {} matched", contracts.len());
    contracts
}

/// One country's contracts, largest first. Empty for a known country without
/// contracts.
pub fn country_contracts<'a>(
    store: &'a FixtureStore,
    code: &str,
    query: &ContractQuery,
) -> Result<Vec<&'a GovernmentContract>, TransparencyError> {
    let country = resolve(store, code)?;
    Ok(match store.contracts().get(&country.code) {
        Some(contracts) => query.apply(contracts),
        None => Vec::new(),
    })
}

/// Flattens a country-keyed collection, keeps records in scope of the
/// query's country and predicate, then applies the query's ordering.
fn filter_tagged<'a, R, Q>(
    collection: &'a BTreeMap<String, Vec<R>>,
    query: &Q,
) -> Vec<CountryTagged<&'a R>>
where
    Q: RecordFilter<Record = R> + CountryScoped,
{
    let mut tagged: Vec<CountryTagged<&'a R>> = flatten_with_country_tag(collection)
        .into_iter()
        .filter(|t| query.matches_country(&t.country_code) && query.matches(t.record))
        .collect();
    tagged.sort_by(|a, b| query.compare(a.record, b.record));
    tagged
}
