use serde::{Deserialize, Serialize};

use super::request::RpcId;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self { code: -32600, message: detail.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self { code: -32603, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// MCP tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// MCP tool call result wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: true,
        }
    }

    /// Serialize `payload` as the text body of a successful result.
    pub fn json<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(json) => Self::text(json),
            Err(e) => {
                tracing::error!(error = %e, "tool payload serialization failed");
                ToolErrorResponse::canonical(ToolErrorCode::InternalError).into()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tool-level error types
// ---------------------------------------------------------------------------

/// Tool error code (v0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorCode {
    InvalidArguments,
    UnknownTool,
    Timeout,
    InternalError,
}

impl ToolErrorCode {
    /// Map to the corresponding JSON-RPC 2.0 error code.
    ///
    /// Caller mistakes      → -32602 (Invalid params)
    /// Server-side failures → -32603 (Internal error)
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::InvalidArguments | Self::UnknownTool => -32602,
            Self::Timeout | Self::InternalError => -32603,
        }
    }
}

/// Tool error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: ToolErrorCode,
    pub message: String,
}

/// Tool error response (top-level)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolErrorResponse {
    pub error: ToolError,
}

impl ToolErrorResponse {
    pub fn new(code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ToolError {
                code,
                message: message.into(),
            },
        }
    }

    /// Construct with the canonical message for a given code.
    pub fn canonical(code: ToolErrorCode) -> Self {
        let message = match &code {
            ToolErrorCode::InvalidArguments => "Tool arguments are invalid",
            ToolErrorCode::UnknownTool => "Tool does not exist",
            ToolErrorCode::Timeout => "Tool call timed out",
            ToolErrorCode::InternalError => "Internal error",
        };
        Self::new(code, message)
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error.code,
                "message": self.error.message,
            }
        })
    }
}

/// Convert a tool error into a JSON-RPC error.
///
/// The JSON-RPC `code` is derived from the tool error code and the full
/// error object is carried in `data` for structured clients.
impl From<ToolErrorResponse> for JsonRpcError {
    fn from(err: ToolErrorResponse) -> Self {
        Self {
            code: err.error.code.json_rpc_code(),
            message: err.error.message.clone(),
            data: Some(err.to_json_value()),
        }
    }
}

/// Convert a tool error into a tool result with `isError: true`.
///
/// The text content is the JSON-serialized `ToolErrorResponse`.
impl From<ToolErrorResponse> for ToolResult {
    fn from(err: ToolErrorResponse) -> Self {
        Self::error(format!("{}\n", err.to_json_value()))
    }
}
