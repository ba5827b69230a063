//! HTTP surface: every route under `/api/v1`, all read-only JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use transparency_lib::analysis::{summarize_cases, summarize_contracts};
use transparency_lib::engine;
use transparency_lib::params::{
    BreakdownParams, ContractParams, CorruptionParams, MeetingParams, YearRangeParams,
};
use transparency_lib::types::{CountrySummary, ErrorBody, HealthStatus, Metric};
use transparency_lib::validation::validate_metric;
use transparency_lib::{FixtureStore, TransparencyError};

const OPENAPI_YAML: &str = include_str!("../../openapi/openapi.yaml");

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FixtureStore>,
}

#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }
}

impl From<TransparencyError> for ApiFailure {
    fn from(err: TransparencyError) -> Self {
        let status = match &err {
            _ if err.is_not_found() => StatusCode::NOT_FOUND,
            TransparencyError::Fixture(e) => {
                tracing::error!("Fixture failure while serving request: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid input: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

type ApiResult = Result<Response, ApiFailure>;

/// Serializes while the borrow of the store is still alive.
fn json<T: Serialize>(value: T) -> ApiResult {
    Ok(Json(value).into_response())
}

fn params<P: DeserializeOwned>(query: Result<Query<P>, QueryRejection>) -> Result<P, ApiFailure> {
    query.map(|Query(p)| p).map_err(ApiFailure::from)
}

/// Unknown metric names are routes that do not exist.
fn metric_segment(segment: &str) -> Result<Metric, ApiFailure> {
    validate_metric(segment).map_err(|_| ApiFailure::not_found())
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/openapi", get(openapi))
        .route("/countries", get(list_countries))
        .route("/countries/:code", get(get_country))
        .route("/countries/:code/budget", get(current_budget))
        .route("/countries/:code/budget/history", get(budget_history))
        .route("/countries/:code/budget/breakdown", get(budget_breakdown))
        .route(
            "/countries/:code/budget/breakdown/history",
            get(breakdown_history),
        )
        .route("/countries/:code/meetings", get(country_meetings))
        .route("/countries/:code/relationships", get(country_relationships))
        .route("/countries/:code/corruption", get(country_corruption))
        .route("/countries/:code/contracts", get(country_contracts))
        .route("/countries/:code/:metric", get(current_metric))
        .route("/countries/:code/:metric/history", get(metric_history))
        .route("/meetings", get(meetings))
        .route("/relationships", get(relationships))
        .route("/corruption", get(corruption))
        .route("/corruption/summary", get(corruption_summary))
        .route("/contracts", get(contracts))
        .route("/contracts/summary", get(contract_summary))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(store: Arc<FixtureStore>, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(AppState { store })).await?;
    Ok(())
}

async fn fallback() -> ApiFailure {
    ApiFailure::not_found()
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

async fn openapi() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "application/yaml; charset=utf-8")],
        OPENAPI_YAML,
    )
}

async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountrySummary>> {
    Json(engine::list_countries(&state.store))
}

async fn get_country(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult {
    json(engine::country(&state.store, &code)?)
}

async fn current_metric(
    State(state): State<AppState>,
    Path((code, metric)): Path<(String, String)>,
) -> ApiResult {
    let metric = metric_segment(&metric)?;
    json(engine::current_metric(&state.store, &code, metric)?)
}

async fn current_budget(State(state): State<AppState>, Path(code): Path<String>) -> ApiResult {
    json(engine::current_metric(&state.store, &code, Metric::Budget)?)
}

async fn metric_history(
    State(state): State<AppState>,
    Path((code, metric)): Path<(String, String)>,
    query: Result<Query<YearRangeParams>, QueryRejection>,
) -> ApiResult {
    let metric = metric_segment(&metric)?;
    let query = params(query)?.to_history_query()?;
    json(engine::metric_history(&state.store, &code, metric, &query)?)
}

async fn budget_history(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<YearRangeParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_history_query()?;
    json(engine::metric_history(
        &state.store,
        &code,
        Metric::Budget,
        &query,
    )?)
}

async fn budget_breakdown(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<BreakdownParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::budget_breakdown(&state.store, &code, &query)?)
}

async fn breakdown_history(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<YearRangeParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_breakdown_history_query()?;
    json(engine::breakdown_history(&state.store, &code, &query)?)
}

async fn meetings(
    State(state): State<AppState>,
    query: Result<Query<MeetingParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::meetings(&state.store, &query))
}

async fn country_meetings(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<MeetingParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::country_meetings(&state.store, &code, &query)?)
}

async fn relationships(State(state): State<AppState>) -> ApiResult {
    json(engine::relationships(&state.store))
}

async fn country_relationships(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult {
    json(engine::country_relationships(&state.store, &code)?)
}

async fn corruption(
    State(state): State<AppState>,
    query: Result<Query<CorruptionParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::corruption_cases(&state.store, &query))
}

async fn corruption_summary(
    State(state): State<AppState>,
    query: Result<Query<CorruptionParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    let cases = engine::corruption_cases(&state.store, &query);
    json(summarize_cases(cases.iter().map(|t| t.record)))
}

async fn country_corruption(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<CorruptionParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::country_corruption_cases(&state.store, &code, &query)?)
}

async fn contracts(
    State(state): State<AppState>,
    query: Result<Query<ContractParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::contracts(&state.store, &query))
}

async fn contract_summary(
    State(state): State<AppState>,
    query: Result<Query<ContractParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    let contracts = engine::contracts(&state.store, &query);
    json(summarize_contracts(contracts.iter().map(|t| t.record)))
}

async fn country_contracts(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<ContractParams>, QueryRejection>,
) -> ApiResult {
    let query = params(query)?.to_query()?;
    json(engine::country_contracts(&state.store, &code, &query)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = match FixtureStore::shared_embedded() {
            Ok(store) => store,
            Err(err) => panic!("embedded fixtures failed to load: {err}"),
        };
        app(AppState { store })
    }

    async fn get(uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(axum::body::Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        match test_app().oneshot(request).await {
            Ok(response) => response,
            Err(err) => panic!("router request failed: {err}"),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
            Ok(bytes) => bytes,
            Err(err) => panic!("failed to read response body: {err}"),
        };
        match String::from_utf8(bytes.to_vec()) {
            Ok(body) => body,
            Err(err) => panic!("response body is not UTF-8: {err}"),
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = get(uri).await;
        let status = response.status();
        let body = body_text(response).await;
        match serde_json::from_str(&body) {
            Ok(value) => (status, value),
            Err(err) => panic!("response body is not JSON: {err}; body={body}"),
        }
    }

    fn years(value: &serde_json::Value) -> Vec<i64> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["year"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn failure_status_follows_error_kind() {
        use transparency_lib::{Dataset, FixtureError};

        let cases = [
            (TransparencyError::CountryNotFound, StatusCode::NOT_FOUND),
            (
                TransparencyError::DatasetNotFound(Dataset::BudgetBreakdown),
                StatusCode::NOT_FOUND,
            ),
            (
                TransparencyError::InvalidInput("bad year".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                TransparencyError::Fixture(FixtureError::Integrity {
                    file: "countries.json",
                    message: "duplicate".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiFailure::from(err).status, expected);
        }
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (status, value) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn openapi_endpoint_lists_routes() {
        let response = get("/api/v1/openapi").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("openapi: 3.0.3"));
        assert!(body.contains("/api/v1/countries/{code}/budget/breakdown"));
        assert!(body.contains("/api/v1/contracts/summary"));
    }

    #[tokio::test]
    async fn countries_list_has_code_and_name_only() {
        let (status, value) = get_json("/api/v1/countries").await;
        assert_eq!(status, StatusCode::OK);
        let first = &value[0];
        assert_eq!(first, &serde_json::json!({"code": "BW", "name": "Botswana"}));
    }

    #[tokio::test]
    async fn lowercase_code_resolves() {
        let (lower_status, lower) = get_json("/api/v1/countries/bw").await;
        let (_, upper) = get_json("/api/v1/countries/BW").await;
        assert_eq!(lower_status, StatusCode::OK);
        assert_eq!(lower, upper);
        assert_eq!(lower["code"], "BW");
    }

    #[tokio::test]
    async fn unknown_country_is_404_on_every_family() {
        for uri in [
            "/api/v1/countries/ZZ",
            "/api/v1/countries/ZZ/budget",
            "/api/v1/countries/ZZ/cpi",
            "/api/v1/countries/ZZ/health/history",
            "/api/v1/countries/ZZ/budget/history",
            "/api/v1/countries/ZZ/budget/breakdown",
            "/api/v1/countries/ZZ/budget/breakdown/history",
            "/api/v1/countries/ZZ/meetings",
            "/api/v1/countries/ZZ/relationships",
            "/api/v1/countries/ZZ/corruption",
            "/api/v1/countries/ZZ/contracts",
        ] {
            let (status, value) = get_json(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(value["error"], "Country not found", "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_dataset_has_entity_message() {
        let (status, value) = get_json("/api/v1/countries/DE/health").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["error"], "Health data not found");

        let (status, value) = get_json("/api/v1/countries/GB/budget/breakdown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["error"], "Budget breakdown not found");
    }

    #[tokio::test]
    async fn current_metric_is_latest_year() {
        let (status, value) = get_json("/api/v1/countries/BW/cpi").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["year"], 2024);
    }

    #[tokio::test]
    async fn history_year_window() {
        let (status, value) =
            get_json("/api/v1/countries/BW/budget/history?start_year=2022&end_year=2023").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(years(&value), vec![2022, 2023]);

        let (_, value) = get_json("/api/v1/countries/KE/education/history?start_year=2023").await;
        assert_eq!(years(&value), vec![2023, 2024]);
    }

    #[tokio::test]
    async fn year_bounds_outside_data_are_accepted() {
        let (status, value) = get_json("/api/v1/countries/BW/budget/history?start_year=1800").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(years(&value), vec![2020, 2021, 2022, 2023, 2024]);

        let (status, value) = get_json("/api/v1/countries/BW/budget/history?end_year=1800").await;
        assert_eq!(status, StatusCode::OK);
        assert!(years(&value).is_empty());
    }

    #[tokio::test]
    async fn topic_spaces_are_significant() {
        let (_, value) = get_json("/api/v1/meetings?topic=ment").await;
        assert_eq!(value.as_array().unwrap().len(), 2);

        let (status, value) = get_json("/api/v1/meetings?topic=%20ment").await;
        assert_eq!(status, StatusCode::OK);
        assert!(value.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_parameter_is_ignored() {
        let (status, value) = get_json("/api/v1/countries/BW/budget/history?start_year=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(years(&value), vec![2020, 2021, 2022, 2023, 2024]);
    }

    #[tokio::test]
    async fn malformed_parameters_are_400() {
        for uri in [
            "/api/v1/countries/BW/budget/history?start_year=abc",
            "/api/v1/meetings?start_date=not-a-date",
            "/api/v1/contracts?min_amount=lots",
            "/api/v1/corruption?severity=extreme",
            "/api/v1/meetings?type=trilateral",
        ] {
            let (status, value) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(
                value["error"].as_str().unwrap().starts_with("Invalid input:"),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_metric_or_route_is_404() {
        let (status, _) = get_json("/api/v1/countries/BW/gdp").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, value) = get_json("/api/v1/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["error"], "Not found");
    }

    #[tokio::test]
    async fn breakdown_latest_and_by_year() {
        let (_, latest) = get_json("/api/v1/countries/BW/budget/breakdown").await;
        assert_eq!(latest["year"], 2023);
        let (_, specific) = get_json("/api/v1/countries/BW/budget/breakdown?year=2021").await;
        assert_eq!(specific["year"], 2021);
        let (status, _) = get_json("/api/v1/countries/BW/budget/breakdown?year=1999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, history) = get_json("/api/v1/countries/US/budget/breakdown/history").await;
        assert_eq!(years(&history), vec![2021, 2022, 2023]);
    }

    #[tokio::test]
    async fn meetings_filter_and_country_scope() {
        let (_, value) = get_json("/api/v1/meetings?topic=TRADE&type=Bilateral").await;
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["MTG-001", "MTG-006"]);

        let (_, value) = get_json("/api/v1/countries/gb/meetings").await;
        for meeting in value.as_array().unwrap() {
            let countries = meeting["countries"].as_array().unwrap();
            assert!(countries.iter().any(|c| c == "GB"));
        }
    }

    #[tokio::test]
    async fn relationships_for_country() {
        let (status, value) = get_json("/api/v1/countries/de/relationships").await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["BW-DE", "DE-US"]);

        let (_, all) = get_json("/api/v1/relationships").await;
        assert!(all.as_object().unwrap().len() > keys.len());
    }

    #[tokio::test]
    async fn corruption_resolved_high() {
        let (_, value) =
            get_json("/api/v1/countries/BW/corruption?status=resolved&severity=high").await;
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["CC-BW-004", "CC-BW-001"]);
    }

    #[tokio::test]
    async fn all_country_views_are_tagged() {
        let (_, value) = get_json("/api/v1/corruption?country=ke").await;
        let cases = value.as_array().unwrap();
        assert!(!cases.is_empty());
        assert!(cases.iter().all(|c| c["country_code"] == "KE"));

        let (_, value) = get_json("/api/v1/contracts?min_amount=100000000").await;
        let amounts: Vec<f64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["amount"].as_f64().unwrap())
            .collect();
        assert!(amounts.iter().all(|&a| a >= 100_000_000.0));
        assert!(amounts.windows(2).all(|w| w[0] >= w[1]));
        assert!(value[0]["country_code"].is_string());
    }

    #[tokio::test]
    async fn summaries() {
        let (status, value) = get_json("/api/v1/corruption/summary?country=BW").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["total_cases"], 5);
        assert_eq!(value["by_severity"]["high"], 2);

        let (status, value) = get_json("/api/v1/contracts/summary?country=BW").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["total_contracts"], 4);
        // (7.5 + 8.2 + 0 + 5.9) / 4 = 5.4
        assert_eq!(value["average_transparency"], 5.4);
    }

    #[tokio::test]
    async fn cors_is_permissive() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .header("origin", "http://dashboard.example")
            .body(axum::body::Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        let response = match test_app().oneshot(request).await {
            Ok(response) => response,
            Err(err) => panic!("router request failed: {err}"),
        };
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
