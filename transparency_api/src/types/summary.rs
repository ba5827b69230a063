//! Aggregate views over corruption cases and contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CaseStatus, ContractStatus, Severity};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CorruptionSummary {
    pub total_cases: usize,

    pub by_severity: BTreeMap<Severity, usize>,

    pub by_status: BTreeMap<CaseStatus, usize>,

    /// Sum of `amount_involved`, per currency.
    pub amount_involved_by_currency: BTreeMap<String, f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContractSummary {
    pub total_contracts: usize,

    pub by_status: BTreeMap<ContractStatus, usize>,

    /// Sum of contract amounts, per currency.
    pub value_by_currency: BTreeMap<String, f64>,

    /// Mean transparency score, one decimal. Unscored contracts count as 0.
    pub average_transparency: f64,
}
