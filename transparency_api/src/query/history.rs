use std::cmp::Ordering;

use url::Url;

use crate::types::{BudgetBreakdown, MetricRecord};

use super::common::{Query, RecordFilter, YearBounded, YearRange};

/// Year window over one metric series. Output keeps the stored order, which
/// is ascending by year.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetricHistoryQuery {
    pub range: YearRange,
}

impl YearBounded for MetricHistoryQuery {
    fn get_range(&mut self) -> &mut YearRange {
        &mut self.range
    }
}

impl Query for MetricHistoryQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        self.range.add_to_url(url)
    }
}

impl RecordFilter for MetricHistoryQuery {
    type Record = MetricRecord;

    fn matches(&self, record: &MetricRecord) -> bool {
        self.range.contains(record.year)
    }
}

/// Year window over a country's budget breakdowns. Breakdowns are stored
/// keyed by year, so the output is explicitly sorted ascending by year.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreakdownHistoryQuery {
    pub range: YearRange,
}

impl YearBounded for BreakdownHistoryQuery {
    fn get_range(&mut self) -> &mut YearRange {
        &mut self.range
    }
}

impl Query for BreakdownHistoryQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        self.range.add_to_url(url)
    }
}

impl RecordFilter for BreakdownHistoryQuery {
    type Record = BudgetBreakdown;

    fn matches(&self, record: &BudgetBreakdown) -> bool {
        self.range.contains(record.year)
    }

    fn compare(&self, a: &BudgetBreakdown, b: &BudgetBreakdown) -> Ordering {
        a.year.cmp(&b.year)
    }
}

/// Selects a single breakdown: the requested `year`, or the latest one when
/// no year is given. Matches are ordered newest first so the answer is the
/// head of [`RecordFilter::apply`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BreakdownQuery {
    pub year: Option<i32>,
}

impl BreakdownQuery {
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

impl Query for BreakdownQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(year) = self.year {
            url.query_pairs_mut().append_pair("year", &year.to_string());
        }
        url
    }
}

impl RecordFilter for BreakdownQuery {
    type Record = BudgetBreakdown;

    fn matches(&self, record: &BudgetBreakdown) -> bool {
        self.year.map_or(true, |year| record.year == year)
    }

    fn compare(&self, a: &BudgetBreakdown, b: &BudgetBreakdown) -> Ordering {
        b.year.cmp(&a.year)
    }
}
