pub mod availability;
pub mod by_area;
pub mod health;
pub mod search;
pub mod status;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolErrorCode,
    ToolErrorResponse, ToolResult,
};
use crate::schema::validate_compiled;
use crate::state::AppState;
use crate::tools;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, state: &AppState) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-tw-parking",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(req.id.clone(), tools::tool_list())),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        ToolErrorResponse::new(
                            ToolErrorCode::InvalidArguments,
                            "Missing params for tools/call",
                        )
                        .into(),
                    ));
                }
            };

            let tool_result = call_with_timeout(&params, state).await;
            match serde_json::to_value(&tool_result) {
                Ok(result_json) => Some(JsonRpcResponse::success(req.id.clone(), result_json)),
                Err(e) => Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Tool result serialization failed: {e}")),
                )),
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run a tool call bounded by the configured tool timeout.
async fn call_with_timeout(params: &ToolCallParams, state: &AppState) -> ToolResult {
    let timeout = state.config.tool_timeout;
    match tokio::time::timeout(timeout, dispatch_tool_call(params, state)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(tool = %params.name, secs = timeout.as_secs(), "tool call timed out");
            ToolErrorResponse::canonical(ToolErrorCode::Timeout).into()
        }
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, state: &AppState) -> ToolResult {
    match params.name.as_str() {
        tools::BY_AREA => match parse_arguments(params) {
            Ok(args) => by_area::handle(args, state).await,
            Err(err) => err,
        },

        tools::SEARCH => match parse_arguments(params) {
            Ok(args) => search::handle(args, state).await,
            Err(err) => err,
        },

        tools::STATUS => match parse_arguments(params) {
            Ok(args) => status::handle(args, state).await,
            Err(err) => err,
        },

        tools::AREA_AVAILABILITY => match parse_arguments(params) {
            Ok(args) => availability::handle_area(args, state).await,
            Err(err) => err,
        },

        tools::ALL_AVAILABILITY => availability::handle_all(state).await,

        "health" => health::handle(state).await,

        _ => ToolErrorResponse::new(
            ToolErrorCode::UnknownTool,
            format!("Unknown tool: {}", params.name),
        )
        .into(),
    }
}

/// Validate tool arguments against the advertised input schema, then
/// deserialize them. Missing arguments are checked as an empty object.
fn parse_arguments<T: DeserializeOwned>(params: &ToolCallParams) -> Result<T, ToolResult> {
    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    let invalid = |detail: String| -> ToolResult {
        ToolErrorResponse::new(
            ToolErrorCode::InvalidArguments,
            format!("Invalid arguments for {}: {detail}", params.name),
        )
        .into()
    };

    if let Some(validator) = tools::argument_validator(&params.name) {
        validate_compiled(validator, &arguments).map_err(|e| invalid(e.to_string()))?;
    }

    serde_json::from_value(arguments).map_err(|e| invalid(e.to_string()))
}
