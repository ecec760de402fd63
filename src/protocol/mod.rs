pub mod request;
pub mod response;

pub use request::{AreaParams, JsonRpcRequest, KeywordParams, LotIdParams, RpcId, ToolCallParams};
pub use response::{
    JsonRpcError, JsonRpcResponse, ToolError, ToolErrorCode, ToolErrorResponse, ToolResult,
    ToolResultContent,
};
