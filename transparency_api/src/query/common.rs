//! Shared query infrastructure: the [`Query`] and [`RecordFilter`] traits and
//! the [`YearRange`] bounds used by the history queries.

use std::cmp::Ordering;

use url::Url;

/// Trait implemented by all query builders. Serializes the constraint set as
/// query-string parameters, using the same names the REST API accepts.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Predicate and ordering semantics of a constraint set over one record kind.
///
/// Unset constraints are wildcards. [`RecordFilter::apply`] keeps the records
/// that satisfy every set constraint and then stable-sorts them with
/// [`RecordFilter::compare`]; the default ordering keeps input order.
pub trait RecordFilter {
    type Record;

    /// Returns true when `record` satisfies every constraint that is set.
    fn matches(&self, record: &Self::Record) -> bool;

    /// Output ordering of matching records.
    fn compare(&self, _a: &Self::Record, _b: &Self::Record) -> Ordering {
        Ordering::Equal
    }

    /// Filters then orders `records`, borrowing from the input.
    fn apply<'a, I>(&self, records: I) -> Vec<&'a Self::Record>
    where
        I: IntoIterator<Item = &'a Self::Record>,
        Self::Record: 'a,
    {
        let mut matched: Vec<&'a Self::Record> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}

/// Constraint sets that may also narrow records to a single country, used by
/// the all-countries corruption and contract views.
pub trait CountryScoped {
    /// The uppercase country code constraint, if any.
    fn country(&self) -> Option<&str>;

    fn matches_country(&self, code: &str) -> bool {
        self.country().map_or(true, |c| c == code)
    }
}

/// Builder methods shared by queries that carry an inclusive year window.
pub trait YearBounded {
    /// Returns a mutable reference to the year bounds.
    fn get_range(&mut self) -> &mut YearRange;

    /// Sets the inclusive lower year bound.
    fn with_start_year(mut self, start_year: i32) -> Self
    where
        Self: Sized,
    {
        self.get_range().start_year = Some(start_year);
        self
    }

    /// Sets the inclusive upper year bound.
    fn with_end_year(mut self, end_year: i32) -> Self
    where
        Self: Sized,
    {
        self.get_range().end_year = Some(end_year);
        self
    }
}

/// Inclusive `[start_year, end_year]` window; either side may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        self.start_year.map_or(true, |start| year >= start)
            && self.end_year.map_or(true, |end| year <= end)
    }

    /// Appends `start_year` / `end_year` to the URL when set.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(start_year) = self.start_year {
            url.query_pairs_mut()
                .append_pair("start_year", &start_year.to_string());
        };
        if let Some(end_year) = self.end_year {
            url.query_pairs_mut()
                .append_pair("end_year", &end_year.to_string());
        };
        url
    }
}

#[cfg(test)]
mod tests {
    use super::YearRange;

    #[test]
    fn open_range_contains_everything() {
        let range = YearRange::default();
        assert!(range.contains(i32::MIN));
        assert!(range.contains(2024));
        assert!(range.contains(i32::MAX));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = YearRange {
            start_year: Some(2022),
            end_year: Some(2023),
        };
        assert!(!range.contains(2021));
        assert!(range.contains(2022));
        assert!(range.contains(2023));
        assert!(!range.contains(2024));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = YearRange {
            start_year: Some(2024),
            end_year: Some(2020),
        };
        assert!((2015..2030).all(|y| !range.contains(y)));
    }
}
