//! End-to-end stdio framing: newline-delimited requests in, one response
//! line per request out.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{free_cars, state_with, taipei_lots, FakeSource};
use mcp_tw_parking::config::ServerConfig;
use mcp_tw_parking::parking::{AvailabilityRecord, FetchError, LotDescription, ParkingSource};
use mcp_tw_parking::server::McpServer;
use mcp_tw_parking::state::AppState;
use serde_json::Value;

async fn run_session(server: &mut McpServer, lines: &[&str]) -> Vec<Value> {
    let input = lines.join("\n") + "\n";
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

const INITIALIZE: &str =
    r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#;
const INITIALIZED: &str = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;

#[tokio::test]
async fn full_session_over_stdio() {
    let state = state_with(FakeSource::new(taipei_lots(), vec![free_cars("002", 6)]));
    let mut server = McpServer::new(state);

    let responses = run_session(
        &mut server,
        &[
            INITIALIZE,
            INITIALIZED,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"parking.area_availability","arguments":{"area":"信義"}}}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 3, "notification gets no response");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "mcp-tw-parking");
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 5);

    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["lots"][0]["available_car"], "N/A");
    assert_eq!(body["lots"][1]["available_car"], 6);
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let source = FakeSource::new(taipei_lots(), vec![]);
    let mut server = McpServer::new(state_with(source.clone()));

    let responses = run_session(
        &mut server,
        &[r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"parking.search","arguments":{"keyword":"仁愛"}}}"#],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(source.description_fetches(), 0);
}

#[tokio::test]
async fn garbage_lines_get_parse_errors_and_session_continues() {
    let mut server = McpServer::new(state_with(FakeSource::new(vec![], vec![])));

    let responses = run_session(
        &mut server,
        &[
            "this is not json",
            "",
            r#"{"jsonrpc":"1.0","id":5,"method":"ping"}"#,
            INITIALIZE,
            r#"{"jsonrpc":"2.0","id":6,"method":"ping"}"#,
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["error"]["code"], -32600);
    assert_eq!(responses[1]["id"], 5);
    assert_eq!(responses[3]["id"], 6);
    assert!(responses[3]["result"].is_object());
}

/// Source whose availability endpoint never answers in time.
struct StalledSource;

#[async_trait]
impl ParkingSource for StalledSource {
    async fn descriptions(&self) -> Result<Vec<LotDescription>, FetchError> {
        Ok(taipei_lots())
    }

    async fn availability(&self) -> Result<Vec<AvailabilityRecord>, FetchError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn slow_tool_call_returns_timeout_error() {
    let config = ServerConfig {
        tool_timeout: Duration::from_millis(50),
        ..ServerConfig::default()
    };
    let mut server = McpServer::new(AppState::with_source(config, Arc::new(StalledSource)));

    let responses = run_session(
        &mut server,
        &[
            INITIALIZE,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"parking.status","arguments":{"id":"001"}}}"#,
        ],
    )
    .await;

    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);
    let body: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(body["error"]["code"], "timeout");
}
