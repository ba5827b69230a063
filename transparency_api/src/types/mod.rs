mod meta;
pub use self::meta::{CountryTagged, ErrorBody, HealthStatus};

mod country;
pub use self::country::{Country, CountryCode, CountrySummary};

mod metric;
pub use self::metric::{Metric, MetricRecord};

mod breakdown;
pub use self::breakdown::BudgetBreakdown;

mod meeting;
pub use self::meeting::{Meeting, MeetingID, MeetingType, Relationship, Relationships};

mod corruption;
pub use self::corruption::{CaseStatus, CorruptionCase, Severity};

mod contract;
pub use self::contract::{ContractStatus, GovernmentContract};

mod summary;
pub use self::summary::{ContractSummary, CorruptionSummary};
