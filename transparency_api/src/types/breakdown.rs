use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Decomposition of one year's budget into named sectors.
///
/// `total` is expected to approximate the sum of `sectors`. The fixture store
/// warns at load time when the two disagree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BudgetBreakdown {
    /// Fiscal year. Fixture files key breakdowns by year, so the field may be
    /// absent on disk and is filled from the key at load time.
    #[serde(default)]
    pub year: i32,

    pub sectors: BTreeMap<String, f64>,

    pub total: f64,
}

impl BudgetBreakdown {
    pub fn sector_sum(&self) -> f64 {
        self.sectors.values().sum()
    }
}
