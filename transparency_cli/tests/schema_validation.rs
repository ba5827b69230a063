use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root().join("data").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn assert_conforms(fixture_name: &str, schema_name: &str) {
    let fixture = load_fixture(fixture_name);
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema)
        .unwrap_or_else(|e| panic!("{schema_name} compiles: {e}"));
    if let Err(e) = validator.validate(&fixture) {
        panic!("{fixture_name} failed validation against {schema_name}: {e}");
    }
}

fn assert_rejects(data: &Value, schema_name: &str, reason: &str) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(data).is_err(), "{schema_name} should reject {reason}");
}

// ---------------------------------------------------------------------------
// Positive validation: shipped fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn countries_fixture_conforms() {
    assert_conforms("countries.json", "country.schema.json");
}

#[test]
fn metric_history_fixtures_conform() {
    for name in [
        "budget_history.json",
        "cpi_history.json",
        "health_history.json",
        "education_history.json",
    ] {
        assert_conforms(name, "metric_history.schema.json");
    }
}

#[test]
fn breakdown_fixture_conforms() {
    assert_conforms("budget_breakdown.json", "budget_breakdown.schema.json");
}

#[test]
fn meetings_fixture_conforms() {
    assert_conforms("meetings.json", "meeting.schema.json");
}

#[test]
fn relationships_fixture_conforms() {
    assert_conforms("relationships.json", "relationships.schema.json");
}

#[test]
fn corruption_fixture_conforms() {
    assert_conforms("corruption_cases.json", "corruption_case.schema.json");
}

#[test]
fn contracts_fixture_conforms() {
    assert_conforms("contracts.json", "contract.schema.json");
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn country_schema_rejects_missing_code() {
    let mut data = load_fixture("countries.json");
    data[0]
        .as_object_mut()
        .expect("country is an object")
        .remove("code");
    assert_rejects(&data, "country.schema.json", "a country without a code");
}

#[test]
fn country_schema_rejects_lowercase_code() {
    let mut data = load_fixture("countries.json");
    data[0]["code"] = Value::String("bw".to_string());
    assert_rejects(&data, "country.schema.json", "a lowercase code");
}

#[test]
fn meeting_schema_rejects_single_country() {
    let mut data = load_fixture("meetings.json");
    data[0]["countries"] = serde_json::json!(["BW"]);
    assert_rejects(&data, "meeting.schema.json", "a meeting with one country");
}

#[test]
fn meeting_schema_rejects_invalid_type() {
    let mut data = load_fixture("meetings.json");
    data[0]["type"] = Value::String("trilateral".to_string());
    assert_rejects(&data, "meeting.schema.json", "an unknown meeting type");
}

#[test]
fn corruption_schema_rejects_invalid_severity() {
    let mut data = load_fixture("corruption_cases.json");
    data["BW"][0]["severity"] = Value::String("extreme".to_string());
    assert_rejects(&data, "corruption_case.schema.json", "an unknown severity");
}

#[test]
fn contract_schema_rejects_additional_properties() {
    let mut data = load_fixture("contracts.json");
    data["BW"][0]
        .as_object_mut()
        .expect("contract is an object")
        .insert("bogusField".to_string(), Value::Number(123.into()));
    assert_rejects(&data, "contract.schema.json", "additional properties");
}

#[test]
fn relationship_schema_rejects_malformed_key() {
    let mut data = load_fixture("relationships.json");
    let first = data
        .as_object()
        .and_then(|m| m.values().next().cloned())
        .expect("at least one relationship");
    data.as_object_mut()
        .expect("relationships is an object")
        .insert("BWUS".to_string(), first);
    assert_rejects(&data, "relationships.schema.json", "a key without a separator");
}

#[test]
fn breakdown_schema_rejects_non_year_key() {
    let mut data = load_fixture("budget_breakdown.json");
    let entry = data["BW"]["2023"].clone();
    data["BW"]
        .as_object_mut()
        .expect("breakdowns are keyed by year")
        .insert("latest".to_string(), entry);
    assert_rejects(&data, "budget_breakdown.schema.json", "a non-year key");
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn empty_collections_conform() {
    for (schema_name, empty) in [
        ("country.schema.json", serde_json::json!([])),
        ("meeting.schema.json", serde_json::json!([])),
        ("metric_history.schema.json", serde_json::json!({})),
        ("corruption_case.schema.json", serde_json::json!({})),
        ("contract.schema.json", serde_json::json!({})),
        ("relationships.schema.json", serde_json::json!({})),
    ] {
        let schema = load_schema(schema_name);
        let validator =
            jsonschema::draft202012::new(&schema).unwrap_or_else(|e| panic!("{schema_name}: {e}"));
        if let Err(e) = validator.validate(&empty) {
            panic!("empty collection should conform to {schema_name}: {e}");
        }
    }
}
