mod common;
pub use self::common::{CountryScoped, Query, RecordFilter, YearBounded, YearRange};

mod history;
pub use self::history::{BreakdownHistoryQuery, BreakdownQuery, MetricHistoryQuery};

mod meeting;
pub use self::meeting::MeetingQuery;

mod corruption;
pub use self::corruption::CorruptionQuery;

mod contract;
pub use self::contract::ContractQuery;
