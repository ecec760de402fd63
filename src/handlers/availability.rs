use serde::Serialize;

use crate::parking::{MergedLotStatus, SpaceCount};
use crate::protocol::{AreaParams, ToolResult};
use crate::state::AppState;

/// Compact per-lot view used by the availability tools.
#[derive(Debug, Serialize)]
struct LotAvailability<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    total_car: Option<u32>,
    available_car: SpaceCount,
    charge_station: &'a str,
    pay_info: &'a str,
}

impl<'a> From<&'a MergedLotStatus> for LotAvailability<'a> {
    fn from(lot: &'a MergedLotStatus) -> Self {
        let d = &lot.description;
        Self {
            id: &d.id,
            name: &d.name,
            address: &d.address,
            total_car: d.total_car,
            available_car: lot.available_car,
            charge_station: &d.charging_station_count,
            pay_info: &d.pay_info,
        }
    }
}

#[derive(Debug, Serialize)]
struct AvailabilityResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<&'a str>,
    count: usize,
    lots: Vec<LotAvailability<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Handle a `parking.area_availability` tool call.
pub async fn handle_area(params: AreaParams, state: &AppState) -> ToolResult {
    let merged = state.engine.get_area_availability(&params.area).await;
    let message = merged
        .is_empty()
        .then(|| format!("No parking lots found in area '{}'", params.area));
    render(Some(&params.area), &merged, message)
}

/// Handle a `parking.all_availability` tool call.
pub async fn handle_all(state: &AppState) -> ToolResult {
    let merged = state.engine.all_availability().await;
    let message = merged
        .is_empty()
        .then(|| "No parking data available right now".to_string());
    render(None, &merged, message)
}

fn render(area: Option<&str>, merged: &[MergedLotStatus], message: Option<String>) -> ToolResult {
    ToolResult::json(&AvailabilityResponse {
        area,
        count: merged.len(),
        lots: merged.iter().map(LotAvailability::from).collect(),
        message,
    })
}
