use chrono::NaiveDate;
use transparency_api::types::{
    CaseStatus, ContractStatus, CorruptionCase, GovernmentContract, Meeting, MeetingType,
    Severity,
};
use transparency_api::{
    BreakdownHistoryQuery, BreakdownQuery, ContractQuery, CorruptionQuery, CountryScoped,
    MeetingQuery, MetricHistoryQuery, Query, RecordFilter, YearBounded,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/api/v1/meetings").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn meeting(id: &str, day: &str, meeting_type: MeetingType, topic: &str) -> Meeting {
    Meeting {
        id: id.to_string(),
        date: date(day),
        countries: vec!["BW".to_string(), "US".to_string()],
        meeting_type,
        topic: topic.to_string(),
        leaders: vec![],
    }
}

fn case(id: &str, status: CaseStatus, severity: Severity, reported: &str) -> CorruptionCase {
    CorruptionCase {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        status,
        severity,
        date_reported: date(reported),
        amount_involved: 1.0,
        currency: "BWP".to_string(),
    }
}

fn contract(id: &str, status: ContractStatus, amount: f64) -> GovernmentContract {
    GovernmentContract {
        id: id.to_string(),
        title: id.to_string(),
        status,
        amount,
        currency: "BWP".to_string(),
        transparency_score: None,
    }
}

#[test]
fn empty_queries_add_nothing() {
    let url = base_url();
    assert_eq!(MeetingQuery::default().add_to_url(&url).query(), None);
    assert_eq!(CorruptionQuery::default().add_to_url(&url).query(), None);
    assert_eq!(ContractQuery::default().add_to_url(&url).query(), None);
    assert_eq!(MetricHistoryQuery::default().add_to_url(&url).query(), None);
    assert_eq!(BreakdownQuery::default().add_to_url(&url).query(), None);
}

#[test]
fn meeting_query_parameters() {
    let url = MeetingQuery::default()
        .with_start_date(date("2023-01-01"))
        .with_end_date(date("2023-12-31"))
        .with_topic("trade")
        .with_meeting_type(MeetingType::Bilateral)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("start_date=2023-01-01"));
    assert!(query.contains("end_date=2023-12-31"));
    assert!(query.contains("topic=trade"));
    assert!(query.contains("type=bilateral"));
}

#[test]
fn history_query_parameters() {
    let url = MetricHistoryQuery::default()
        .with_start_year(2022)
        .with_end_year(2023)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("start_year=2022"));
    assert!(query.contains("end_year=2023"));

    let url = BreakdownHistoryQuery::default()
        .with_end_year(2021)
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("end_year=2021"));

    let url = BreakdownQuery::default().with_year(2023).add_to_url(&base_url());
    assert_eq!(url.query(), Some("year=2023"));
}

#[test]
fn corruption_and_contract_parameters() {
    let url = CorruptionQuery::default()
        .with_status(CaseStatus::Resolved)
        .with_severity(Severity::High)
        .with_country("bw")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("status=resolved"));
    assert!(query.contains("severity=high"));
    assert!(query.contains("country=BW"));

    let url = ContractQuery::default()
        .with_status(ContractStatus::Completed)
        .with_min_amount(1000000.0)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("status=completed"));
    assert!(query.contains("min_amount=1000000"));
}

#[test]
fn meeting_topic_is_case_insensitive_substring() {
    let meetings = vec![
        meeting("a", "2023-01-10", MeetingType::Bilateral, "Trade and investment"),
        meeting("b", "2023-02-10", MeetingType::Bilateral, "Energy"),
        meeting("c", "2023-03-10", MeetingType::Multilateral, "Regional TRADE"),
    ];
    let ids: Vec<&str> = MeetingQuery::default()
        .with_topic("tRaDe")
        .apply(&meetings)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn meeting_dates_are_inclusive_and_type_is_exact() {
    let meetings = vec![
        meeting("a", "2023-01-10", MeetingType::Bilateral, "x"),
        meeting("b", "2023-02-10", MeetingType::Multilateral, "x"),
        meeting("c", "2023-03-10", MeetingType::Bilateral, "x"),
        meeting("d", "2023-04-10", MeetingType::Bilateral, "x"),
    ];
    let ids: Vec<&str> = MeetingQuery::default()
        .with_start_date(date("2023-01-10"))
        .with_end_date(date("2023-03-10"))
        .apply(&meetings)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let ids: Vec<&str> = MeetingQuery::default()
        .with_meeting_type(MeetingType::Bilateral)
        .apply(&meetings)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
}

#[test]
fn corruption_filter_intersects_and_sorts_newest_first() {
    let cases = vec![
        case("old-hit", CaseStatus::Resolved, Severity::High, "2021-04-12"),
        case("wrong-status", CaseStatus::Ongoing, Severity::High, "2023-09-03"),
        case("wrong-severity", CaseStatus::Resolved, Severity::Low, "2022-01-20"),
        case("new-hit", CaseStatus::Resolved, Severity::High, "2023-02-28"),
    ];
    let ids: Vec<&str> = CorruptionQuery::default()
        .with_status(CaseStatus::Resolved)
        .with_severity(Severity::High)
        .apply(&cases)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["new-hit", "old-hit"]);
}

#[test]
fn contract_threshold_is_inclusive_and_sorts_largest_first() {
    let contracts = vec![
        contract("small", ContractStatus::Ongoing, 10.0),
        contract("edge", ContractStatus::Completed, 100.0),
        contract("big", ContractStatus::Ongoing, 500.0),
    ];
    let ids: Vec<&str> = ContractQuery::default()
        .with_min_amount(100.0)
        .apply(&contracts)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["big", "edge"]);
}

#[test]
fn country_scope_is_uppercased_and_wildcard_when_unset() {
    let query = CorruptionQuery::default().with_country("ke");
    assert!(query.matches_country("KE"));
    assert!(!query.matches_country("BW"));
    assert!(CorruptionQuery::default().matches_country("BW"));
    assert!(ContractQuery::default().with_country("za").matches_country("ZA"));
}
