//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config file → SOAP requests → Singer messages

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tap_workday::cli::{Cli, Mode, Runner};
use tap_workday::config::TapConfig;
use tap_workday::engine::SyncEngine;
use tap_workday::http::{HttpClient, HttpClientConfig};
use tap_workday::output::CollectingSink;
use tap_workday::schema::{all_streams, humanresources};
use tap_workday::Error;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_PATH: &str = "/ccx/service/acme/Human_Resources/v39.2";

fn page_response(total_pages: u32, worker_ids: &[&str]) -> String {
    let workers: String = worker_ids
        .iter()
        .map(|id| {
            format!(
                "<wd:Worker><wd:Worker_Data><wd:Worker_ID>{id}</wd:Worker_ID>\
                 <wd:User_ID>user{id}</wd:User_ID></wd:Worker_Data></wd:Worker>"
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <wd:Get_Workers_Response xmlns:wd="urn:com.workday/bsvc" wd:version="v39.2">
      <wd:Response_Results>
        <wd:Total_Results>{}</wd:Total_Results>
        <wd:Total_Pages>{total_pages}</wd:Total_Pages>
      </wd:Response_Results>
      <wd:Response_Data>{workers}</wd:Response_Data>
    </wd:Get_Workers_Response>
  </env:Body>
</env:Envelope>"#,
        worker_ids.len()
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(header("Content-Type", "application/xml"))
        .and(body_string_contains(format!("<bsvc:Page>{page}</bsvc:Page>")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn config_file(server: &MockServer, extra: &Value) -> NamedTempFile {
    let mut config = json!({
        "username": "isu_tap",
        "password": "s3cret",
        "base_url": server.uri(),
        "tenant": "acme",
    });
    if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        base.extend(extra.clone());
    }

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{config}").unwrap();
    file
}

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("tap-workday").chain(args.iter().copied()))
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

async fn run(cli: Cli) -> (tap_workday::Result<()>, Vec<Value>) {
    let mut out = Vec::new();
    let result = Runner::new(cli).run_with(&mut out).await;
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (result, lines)
}

// ============================================================================
// Full Tap Runs
// ============================================================================

#[tokio::test]
async fn test_full_sync_two_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_response(2, &["123"])).await;
    mount_page(&server, 2, page_response(2, &["456"])).await;

    let config = config_file(&server, &json!({}));
    let (result, messages) = run(cli(&["--config", path_arg(config.path())])).await;
    result.unwrap();

    let types: Vec<&str> = messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["SCHEMA", "RECORD", "RECORD", "STATE"]);

    assert_eq!(messages[0]["stream"], "humanresources");
    assert_eq!(messages[0]["key_properties"], json!(["wd_Worker_ID"]));

    let ids: Vec<&str> = messages[1..3]
        .iter()
        .map(|m| m["record"]["wd_Worker_ID"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["123", "456"]);
    assert!(messages[1]["time_extracted"].is_string());

    assert_eq!(messages[3]["value"], json!({"bookmarks": {}}));
}

#[tokio::test]
async fn test_requests_include_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(body_string_contains("<wsse:Username>isu_tap</wsse:Username>"))
        .and(body_string_contains(">s3cret</wsse:Password>"))
        .and(body_string_contains("<bsvc:Count>250</bsvc:Count>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_response(1, &["1"])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_file(&server, &json!({"page_size": 250}));
    let (result, messages) = run(cli(&["--config", path_arg(config.path())])).await;
    result.unwrap();
    assert_eq!(messages.len(), 3);
}

#[tokio::test]
async fn test_zero_pages_single_request() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_response(0, &[])).await;

    let config = config_file(&server, &json!({}));
    let (result, messages) = run(cli(&["--config", path_arg(config.path())])).await;
    result.unwrap();

    let types: Vec<&str> = messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["SCHEMA", "STATE"]);
}

#[tokio::test]
async fn test_http_error_aborts_sync() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_response(3, &["1"])).await;

    Mock::given(method("POST"))
        .and(body_string_contains("<bsvc:Page>2</bsvc:Page>"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_file(&server, &json!({}));
    let (result, messages) = run(cli(&["--config", path_arg(config.path())])).await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    // records of page 1 were already written
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["type"] != "STATE"));
}

#[tokio::test]
async fn test_soap_fault_reported() {
    let server = MockServer::start().await;
    let fault = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <SOAP-ENV:Fault>
      <faultcode>SOAP-ENV:Client.validationError</faultcode>
      <faultstring>Invalid tenant</faultstring>
    </SOAP-ENV:Fault>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault))
        .mount(&server)
        .await;

    let config = config_file(&server, &json!({}));
    let (result, _) = run(cli(&["--config", path_arg(config.path())])).await;

    match result.unwrap_err() {
        Error::SoapFault { code, message } => {
            assert_eq!(code, "SOAP-ENV:Client.validationError");
            assert_eq!(message, "Invalid tenant");
        }
        other => panic!("expected SoapFault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_max_pages_exceeded() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_response(9, &["1"])).await;

    let config = config_file(&server, &json!({"max_pages": 1}));
    let (result, _) = run(cli(&["--config", path_arg(config.path())])).await;

    assert!(matches!(
        result.unwrap_err(),
        Error::PageLimitExceeded {
            limit: 1,
            total_pages: 9
        }
    ));
}

#[tokio::test]
async fn test_deselected_catalog_skips_stream() {
    let server = MockServer::start().await;

    let config = config_file(&server, &json!({}));
    let mut catalog = NamedTempFile::new().unwrap();
    write!(
        catalog,
        "{}",
        json!({"streams": [{
            "tap_stream_id": "humanresources",
            "stream": "humanresources",
            "metadata": [{"breadcrumb": [], "metadata": {"selected": false}}]
        }]})
    )
    .unwrap();

    let (result, messages) = run(cli(&[
        "--config",
        path_arg(config.path()),
        "--properties",
        path_arg(catalog.path()),
    ]))
    .await;
    result.unwrap();

    assert_eq!(messages, vec![json!({"type": "STATE", "value": {"bookmarks": {}}})]);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Discovery and Metadata
// ============================================================================

#[tokio::test]
async fn test_discover_prints_catalog() {
    let server = MockServer::start().await;
    let config = config_file(&server, &json!({}));

    let mut out = Vec::new();
    Runner::new(cli(&["--config", path_arg(config.path()), "--discover"]))
        .run_with(&mut out)
        .await
        .unwrap();

    let catalog: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(catalog["streams"][0]["tap_stream_id"], "humanresources");
    assert_eq!(
        catalog["streams"][0]["schema"]["properties"]["wd_Worker_ID"]["type"],
        json!(["string", "null"])
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_about_without_config() {
    let parsed = cli(&["--about"]);
    assert_eq!(parsed.mode(), Mode::About);

    let mut out = Vec::new();
    Runner::new(parsed).run_with(&mut out).await.unwrap();

    let about: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(about["name"], "tap-workday");
    assert!(about["settings"]["properties"]["password"].is_object());
}

#[tokio::test]
async fn test_sync_requires_config() {
    let (result, messages) = run(cli(&[])).await;
    assert!(matches!(result.unwrap_err(), Error::MissingConfigField { .. }));
    assert!(messages.is_empty());
}

#[test]
fn test_state_flag_accepted() {
    let parsed = cli(&["--config", "c.json", "--state", "state.json"]);
    assert_eq!(parsed.mode(), Mode::Sync);
    assert!(parsed.state.is_some());
}

// ============================================================================
// Library API
// ============================================================================

#[tokio::test]
async fn test_engine_with_http_client() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_response(1, &["21001", "21002"])).await;

    let config = TapConfig {
        base_url: server.uri(),
        tenant: "acme".to_string(),
        ..Default::default()
    };
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .timeout(config.timeout())
            .build(),
    )
    .unwrap();
    let mut engine = SyncEngine::from_config(client, &config).unwrap();
    let mut sink = CollectingSink::new();

    let stats = engine.run(&all_streams().unwrap(), &mut sink).await.unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.records_synced, 2);
    assert_eq!(sink.records()[1]["wd_User_ID"], "user21002");

    let stream = humanresources().unwrap();
    assert_eq!(sink.messages()[0].stream(), Some(stream.name.as_str()));
}
