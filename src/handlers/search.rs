use serde::Serialize;

use crate::parking::LotDescription;
use crate::protocol::{KeywordParams, ToolResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    keyword: &'a str,
    count: usize,
    lots: Vec<LotDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Handle a `parking.search` tool call.
///
/// Matches the keyword against both name and address, so a lot whose
/// address mentions a street is found even if its name does not.
pub async fn handle(params: KeywordParams, state: &AppState) -> ToolResult {
    let lots = state.engine.search_by_keyword(&params.keyword).await;
    let message = lots
        .is_empty()
        .then(|| format!("No parking lots match '{}'", params.keyword));

    ToolResult::json(&SearchResponse {
        keyword: &params.keyword,
        count: lots.len(),
        lots,
        message,
    })
}
