use serde::Serialize;

use crate::parking::LotDescription;
use crate::protocol::{AreaParams, ToolResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ByAreaResponse<'a> {
    area: &'a str,
    count: usize,
    lots: Vec<LotDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Handle a `parking.by_area` tool call.
pub async fn handle(params: AreaParams, state: &AppState) -> ToolResult {
    let lots = state.engine.filter_by_area(&params.area).await;
    let message = lots
        .is_empty()
        .then(|| format!("No parking lots found in area '{}'", params.area));

    ToolResult::json(&ByAreaResponse {
        area: &params.area,
        count: lots.len(),
        lots,
        message,
    })
}
