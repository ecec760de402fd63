use serde::Serialize;

use crate::parking::MergedLotStatus;
use crate::protocol::{LotIdParams, ToolResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StatusResponse<'a> {
    Found {
        found: bool,
        lot: MergedLotStatus,
    },
    NotFound {
        found: bool,
        id: &'a str,
        message: String,
    },
}

/// Handle a `parking.status` tool call.
///
/// An unknown id is a normal answer (`found: false`), not a tool error.
pub async fn handle(params: LotIdParams, state: &AppState) -> ToolResult {
    let payload = match state.engine.get_full_status(&params.id).await {
        Some(lot) => StatusResponse::Found { found: true, lot },
        None => StatusResponse::NotFound {
            found: false,
            id: &params.id,
            message: format!("No parking lot with id '{}'", params.id),
        },
    };
    ToolResult::json(&payload)
}
