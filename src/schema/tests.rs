//! Tests for the schema module

use super::*;
use crate::decode::PathStep;
use crate::types::ReplicationMethod;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

// ============================================================================
// Type Tests
// ============================================================================

#[test]
fn test_json_type_display() {
    assert_eq!(JsonType::String.to_string(), "string");
    assert_eq!(JsonType::Object.to_string(), "object");
    assert_eq!(JsonType::Null.to_string(), "null");
}

#[test]
fn test_nullable_type() {
    let t = JsonTypeOrArray::nullable(JsonType::String);
    assert!(t.is_nullable());
    assert_eq!(t.primary_type(), Some(JsonType::String));
    assert_eq!(serde_json::to_value(&t).unwrap(), json!(["string", "null"]));

    assert_eq!(
        JsonTypeOrArray::nullable(JsonType::Null),
        JsonTypeOrArray::Single(JsonType::Null)
    );
}

#[test]
fn test_string_property_json() {
    let prop = SchemaProperty::string().with_description("id");
    assert!(prop.is_nullable());
    assert_eq!(
        serde_json::to_value(&prop).unwrap(),
        json!({"type": ["string", "null"], "description": "id"})
    );
}

// ============================================================================
// Stream Tests
// ============================================================================

#[test]
fn test_humanresources_stream() {
    let stream = humanresources().unwrap();
    assert_eq!(stream.name, "humanresources");
    assert_eq!(stream.key_properties, vec!["wd_Worker_ID"]);
    assert_eq!(stream.replication_method, ReplicationMethod::FullTable);
    assert_eq!(stream.record_path.to_string(), DEFAULT_RECORD_PATH);
    assert_eq!(
        stream.record_path.steps(),
        &[PathStep::Wildcard, PathStep::Field("wd_Worker_Data".into())]
    );
}

#[test]
fn test_stream_record_path_override() {
    let stream = humanresources().unwrap().with_record_path("$[*]").unwrap();
    assert_eq!(stream.record_path.steps(), &[PathStep::Wildcard]);

    assert!(humanresources().unwrap().with_record_path("workers").is_err());
}

#[test]
fn test_humanresources_schema_shape() {
    let schema = humanresources_schema();
    assert!(schema.is_required("wd_Worker_ID"));
    assert!(schema.get_property("wd_User_ID").is_some());

    let paths: [&[&str]; 7] = [
        &[
            "wd_Personal_Data",
            "wd_Name_Data",
            "wd_Legal_Name_Data",
            "wd_Name_Detail_Data",
            "@wd_Formatted_Name",
        ],
        &[
            "wd_Personal_Data",
            "wd_Name_Data",
            "wd_Legal_Name_Data",
            "wd_Name_Detail_Data",
            "@wd_Reporting_Name",
        ],
        &["wd_Employment_Data", "wd_Worker_Job_Data", "@wd_Primary_Job"],
        &[
            "wd_Employment_Data",
            "wd_Worker_Job_Data",
            "wd_Position_Data",
            "@wd_Effective_Date",
        ],
        &[
            "wd_Employment_Data",
            "wd_Worker_Job_Data",
            "wd_Position_Data",
            "wd_Position_Title",
        ],
        &["wd_User_Account_Data", "wd_User_Name"],
        &[
            "wd_User_Account_Data",
            "wd_Show_User_Name_in_Simplified_View",
        ],
    ];
    for path in paths {
        assert!(schema.get_path(path).is_some(), "missing {path:?}");
    }

    assert!(schema.get_path(&["wd_User_Account_Data", "nope"]).is_none());
    assert!(schema.get_path(&[]).is_none());
}

#[test]
fn test_schema_json() {
    let value = humanresources_schema().to_json();
    assert_eq!(value["type"], "object");
    assert_eq!(value["required"], json!(["wd_Worker_ID"]));
    assert_eq!(
        value["properties"]["wd_Worker_ID"]["type"],
        json!(["string", "null"])
    );
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_discover_catalog() {
    let catalog = Catalog::discover(&all_streams().unwrap());
    assert_eq!(catalog.streams.len(), 1);

    let entry = catalog.get("humanresources").unwrap();
    assert_eq!(entry.tap_stream_id, "humanresources");
    assert_eq!(entry.key_properties, vec!["wd_Worker_ID"]);
    assert!(entry.is_selected());

    let meta = entry.stream_metadata().unwrap();
    assert_eq!(meta["replication-method"], "FULL_TABLE");
    assert_eq!(meta["table-key-properties"], json!(["wd_Worker_ID"]));
}

#[test]
fn test_catalog_round_trips_through_json() {
    let catalog = Catalog::discover(&all_streams().unwrap());
    let parsed = Catalog::from_json(&catalog.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, catalog);
}

#[test]
fn test_catalog_deselected_stream() {
    let catalog = Catalog::from_json(
        r#"{"streams": [{
            "tap_stream_id": "humanresources",
            "stream": "humanresources",
            "metadata": [{"breadcrumb": [], "metadata": {"selected": false}}]
        }]}"#,
    )
    .unwrap();

    assert!(!catalog.is_selected("humanresources"));
    assert!(catalog.select(all_streams().unwrap()).is_empty());
}

#[test]
fn test_catalog_missing_stream_is_not_selected() {
    let catalog = Catalog::from_json(r#"{"streams": []}"#).unwrap();
    assert!(!catalog.is_selected("humanresources"));
}

#[test]
fn test_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"streams": [{{"tap_stream_id": "humanresources", "stream": "humanresources"}}]}}"#
    )
    .unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    assert!(catalog.is_selected("humanresources"));
    assert_eq!(catalog.select(all_streams().unwrap()).len(), 1);
}

#[test]
fn test_catalog_invalid_json() {
    assert!(Catalog::from_json("not json").is_err());
    assert!(Catalog::from_file("/nonexistent/catalog.json").is_err());
}
