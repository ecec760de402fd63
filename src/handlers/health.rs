use serde::Serialize;

use crate::protocol::ToolResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    descriptions_cached: bool,
    cached_lots: usize,
    cache_age_secs: Option<u64>,
}

/// Report description cache state. Never fetches.
pub async fn handle(state: &AppState) -> ToolResult {
    let cache = state.engine.cache();
    let cached_lots = cache.len().await.unwrap_or(0);
    let payload = HealthResponse {
        status: "ok",
        descriptions_cached: cached_lots > 0,
        cached_lots,
        cache_age_secs: cache.age().await.map(|age| age.as_secs()),
    };
    ToolResult::json(&payload)
}
