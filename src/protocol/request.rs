use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 ID — may be a number or string per spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Arguments for `parking.by_area` and `parking.area_availability`.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaParams {
    /// Administrative district, matched as a substring (e.g. `信義`).
    pub area: String,
}

/// Arguments for `parking.search`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordParams {
    pub keyword: String,
}

/// Arguments for `parking.status`.
#[derive(Debug, Clone, Deserialize)]
pub struct LotIdParams {
    pub id: String,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}
