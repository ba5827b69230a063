//! Summary helpers over corruption cases, contracts, and budget breakdowns.
//!
//! All functions take borrowed records and return owned summary values. They
//! never touch the store, so they work equally on filtered or full sets.

use std::collections::BTreeMap;

use transparency_api::types::{
    BudgetBreakdown, ContractSummary, CorruptionCase, CorruptionSummary, GovernmentContract,
};

/// Counts cases by severity and status and sums the amounts per currency.
pub fn summarize_cases<'a, I>(cases: I) -> CorruptionSummary
where
    I: IntoIterator<Item = &'a CorruptionCase>,
{
    let mut summary = CorruptionSummary::default();
    for case in cases {
        summary.total_cases += 1;
        *summary.by_severity.entry(case.severity).or_default() += 1;
        *summary.by_status.entry(case.status).or_default() += 1;
        *summary
            .amount_involved_by_currency
            .entry(case.currency.clone())
            .or_default() += case.amount_involved;
    }
    summary
}

/// Counts contracts by status, sums values per currency, and averages the
/// transparency score to one decimal. Unscored contracts count as zero.
pub fn summarize_contracts<'a, I>(contracts: I) -> ContractSummary
where
    I: IntoIterator<Item = &'a GovernmentContract>,
{
    let mut summary = ContractSummary::default();
    let mut score_total = 0.0;
    for contract in contracts {
        summary.total_contracts += 1;
        *summary.by_status.entry(contract.status).or_default() += 1;
        *summary
            .value_by_currency
            .entry(contract.currency.clone())
            .or_default() += contract.amount;
        score_total += contract.transparency_score.unwrap_or(0.0);
    }
    if summary.total_contracts > 0 {
        let mean = score_total / summary.total_contracts as f64;
        summary.average_transparency = (mean * 10.0).round() / 10.0;
    }
    summary
}

/// Each sector's share of the breakdown total, as a percentage.
///
/// Returns an empty map when the total is not positive.
pub fn sector_shares(breakdown: &BudgetBreakdown) -> BTreeMap<String, f64> {
    if breakdown.total <= 0.0 {
        return BTreeMap::new();
    }
    breakdown
        .sectors
        .iter()
        .map(|(sector, amount)| (sector.clone(), amount / breakdown.total * 100.0))
        .collect()
}
