use incident_etl::domain::model::ColumnMapping;
use incident_etl::utils::error::{ErrorSeverity, EtlError};
use incident_etl::{CliConfig, EtlEngine, IncidentPipeline, LocalStorage, TomlConfig};
use regex::Regex;
use std::path::Path;
use tempfile::TempDir;

const INPUT_REL: &str = "data/legacy_incidents_data.csv";
const OUTPUT_REL: &str = "data/cloud_ready_incidents.json";

fn test_config() -> CliConfig {
    CliConfig {
        input_path: INPUT_REL.to_string(),
        output_path: OUTPUT_REL.to_string(),
        summary_placeholder: "No summary provided".to_string(),
        caller_placeholder: "Unknown".to_string(),
        config: None,
        verbose: false,
        monitor: false,
        columns: ColumnMapping::default(),
    }
}

fn write_input(dir: &TempDir, content: &str) {
    let path = dir.path().join(INPUT_REL);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_output(dir: &TempDir) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(dir.path().join(OUTPUT_REL)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn output_exists(dir: &TempDir) -> bool {
    Path::new(&dir.path().join(OUTPUT_REL)).exists()
}

#[tokio::test]
async fn test_end_to_end_transforms_legacy_export() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "\
number,short_description,caller_id,priority,sys_created_on,assignment_group
INC001,,Bob,1,2021-03-05 10:15:00,network
INC002,Printer on fire,Alice,2,2021-03-06 11:00:00,hardware
INC003,Password reset,Dave,3,2021-03-07 09:45:12,service desk
",
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    assert_eq!(output_path, OUTPUT_REL);

    let records = read_output(&temp_dir);
    assert_eq!(records.len(), 3);

    // Row with a missing summary comes out with the placeholder and a
    // normalized timestamp, nothing else changed
    assert_eq!(
        records[0],
        serde_json::json!({
            "incident_id": "INC001",
            "summary": "No summary provided",
            "caller": "Bob",
            "priority_level": 1,
            "creation_timestamp": "2021-03-05T10:15:00Z"
        })
    );

    let timestamp_pattern = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap();
    for record in &records {
        let object = record.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(!object["summary"].as_str().unwrap().is_empty());
        assert!(!object["caller"].as_str().unwrap().is_empty());
        assert!(timestamp_pattern.is_match(object["creation_timestamp"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_missing_input_reports_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, EtlError::MissingInputError { .. }));
    // Missing input is the one condition the tool treats as a normal end
    assert_eq!(err.severity(), ErrorSeverity::Low);
    assert!(!output_exists(&temp_dir));
}

#[tokio::test]
async fn test_unparseable_date_aborts_before_any_output() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "\
number,short_description,caller_id,priority,sys_created_on
INC001,Broken VPN,Bob,1,2021-03-05 10:15:00
INC002,Printer on fire,Alice,2,not-a-date
",
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    match err {
        EtlError::DateParseError { value } => assert_eq!(value, "not-a-date"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!output_exists(&temp_dir));
}

#[tokio::test]
async fn test_malformed_lines_are_excluded() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "\
number,short_description,caller_id,priority,sys_created_on
INC001,Broken VPN,Bob,1,2021-03-05 10:15:00
INC002,this,line,has,far,too,many,fields
INC003,Laptop stolen,Carol,3,2021-03-07 09:30:00
",
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let records = read_output(&temp_dir);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["incident_id"], "INC001");
    assert_eq!(records[1]["incident_id"], "INC003");
}

#[tokio::test]
async fn test_missing_required_column_halts_before_output() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "\
number,short_description,priority,sys_created_on
INC001,Broken VPN,1,2021-03-05 10:15:00
",
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, EtlError::SchemaError { .. }));
    assert!(!output_exists(&temp_dir));
}

#[tokio::test]
async fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        "\
number,short_description,caller_id,priority,sys_created_on
INC001,Broken VPN,Bob,1,2021-03-05 10:15:00
",
    );
    let stale = temp_dir.path().join(OUTPUT_REL);
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, "stale contents").unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, test_config());
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let records = read_output(&temp_dir);
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_toml_config_drives_a_custom_export_shape() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tickets.csv");
    std::fs::write(
        &input,
        "\
ticket_no,title,reported_by,prio,opened_at
T-1,,*,1,2022-06-01 12:00:00
",
    )
    .unwrap();

    let toml_content = r#"
[pipeline]
name = "ticket-migration"
description = "Custom ticket export"
version = "1.0"

[source]
path = "tickets.csv"

[transform]
summary_placeholder = "(no title)"
caller_placeholder = "(nobody)"

[transform.columns]
incident_id = "ticket_no"
summary = "title"
caller = "reported_by"
priority_level = "prio"
creation_timestamp = "opened_at"

[load]
output_path = "out/tickets.json"
"#;

    let config = TomlConfig::from_toml_str(toml_content).unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = IncidentPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let text = std::fs::read_to_string(temp_dir.path().join("out/tickets.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["incident_id"], "T-1");
    assert_eq!(records[0]["summary"], "(no title)");
    assert_eq!(records[0]["caller"], "*");
    assert_eq!(records[0]["creation_timestamp"], "2022-06-01T12:00:00Z");
}
