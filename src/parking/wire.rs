//! Upstream record shapes as the TCMSV feed spells them.
//!
//! The feed is loosely typed: counts arrive as numbers or numeric strings,
//! and any field may be missing or null. Everything is read as an optional
//! JSON value and normalized when converted into the domain model.

use serde::Deserialize;
use serde_json::Value;

use super::model::{AvailabilityRecord, LotDescription, SpaceCount, DEFAULT_FACILITY_COUNT};

#[derive(Debug, Deserialize)]
pub struct RawLotDescription {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub area: Option<Value>,
    #[serde(default)]
    pub tel: Option<Value>,
    #[serde(rename = "totalcar", default)]
    pub total_car: Option<Value>,
    #[serde(rename = "totalmotor", default)]
    pub total_motor: Option<Value>,
    #[serde(rename = "payex", default)]
    pub pay_info: Option<Value>,
    #[serde(rename = "ChargingStation", default)]
    pub charging_station: Option<Value>,
    #[serde(rename = "Handicap_First", default)]
    pub handicap_first: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawAvailability {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(rename = "availablecar", default)]
    pub available_car: Option<Value>,
    #[serde(rename = "availablemotor", default)]
    pub available_motor: Option<Value>,
}

impl RawLotDescription {
    /// Convert into the domain model. Returns `None` when the record has
    /// no usable id, since such a lot can never be joined or looked up.
    pub fn into_description(self) -> Option<LotDescription> {
        let id = text(self.id.as_ref())?;
        Some(LotDescription {
            id,
            name: text(self.name.as_ref()).unwrap_or_default(),
            address: text(self.address.as_ref()).unwrap_or_default(),
            area: text(self.area.as_ref()).unwrap_or_default(),
            tel: text(self.tel.as_ref()).unwrap_or_default(),
            total_car: integer(self.total_car.as_ref()).and_then(|n| u32::try_from(n).ok()),
            total_motor: integer(self.total_motor.as_ref()).and_then(|n| u32::try_from(n).ok()),
            pay_info: text(self.pay_info.as_ref()).unwrap_or_default(),
            charging_station_count: facility_count(self.charging_station.as_ref()),
            handicap_spot_count: facility_count(self.handicap_first.as_ref()),
        })
    }
}

impl RawAvailability {
    pub fn into_record(self) -> Option<AvailabilityRecord> {
        let id = text(self.id.as_ref())?;
        Some(AvailabilityRecord {
            id,
            available_car: SpaceCount::from_raw(integer(self.available_car.as_ref())),
            available_motor: SpaceCount::from_raw(integer(self.available_motor.as_ref())),
        })
    }
}

/// Strings pass through, numbers are rendered, empty/null/other are absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Facility counts keep the feed's string verbatim (blank included).
/// Numbers are rendered; a missing or null key becomes the default.
fn facility_count(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => DEFAULT_FACILITY_COUNT.to_string(),
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
