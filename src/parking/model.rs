use serde::{Serialize, Serializer};

/// Rendered in place of a count the upstream feed did not provide.
pub const UNKNOWN_MARKER: &str = "N/A";

/// Facility count used when the description feed omits the field.
pub const DEFAULT_FACILITY_COUNT: &str = "0";

/// A free-space count that may be unknown.
///
/// `Unknown` is never conflated with `Known(0)`: a full lot and a lot
/// with no availability record are different answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpaceCount {
    Known(u32),
    #[default]
    Unknown,
}

impl SpaceCount {
    /// Interpret a raw upstream count. Negative values are the feed's
    /// "no data" marker and map to `Unknown`.
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(n) if n >= 0 => u32::try_from(n).map_or(Self::Unknown, Self::Known),
            _ => Self::Unknown,
        }
    }

    pub fn known(&self) -> Option<u32> {
        match self {
            Self::Known(n) => Some(*n),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl Serialize for SpaceCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(n) => serializer.serialize_u32(*n),
            Self::Unknown => serializer.serialize_str(UNKNOWN_MARKER),
        }
    }
}

/// Static metadata for one parking lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotDescription {
    pub id: String,
    pub name: String,
    pub address: String,
    pub area: String,
    pub tel: String,
    pub total_car: Option<u32>,
    pub total_motor: Option<u32>,
    pub pay_info: String,
    pub charging_station_count: String,
    pub handicap_spot_count: String,
}

impl LotDescription {
    /// Minimal description with only an id; remaining text fields empty,
    /// facility counts at their defaults.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            address: String::new(),
            area: String::new(),
            tel: String::new(),
            total_car: None,
            total_motor: None,
            pay_info: String::new(),
            charging_station_count: DEFAULT_FACILITY_COUNT.to_string(),
            handicap_spot_count: DEFAULT_FACILITY_COUNT.to_string(),
        }
    }

    /// Case-sensitive substring match on `area`.
    pub fn in_area(&self, area: &str) -> bool {
        self.area.contains(area)
    }

    /// Substring match on `name` or `address`.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.address.contains(keyword)
    }
}

/// Live occupancy for one lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityRecord {
    pub id: String,
    pub available_car: SpaceCount,
    pub available_motor: SpaceCount,
}

impl AvailabilityRecord {
    pub fn new(id: impl Into<String>, available_car: SpaceCount, available_motor: SpaceCount) -> Self {
        Self {
            id: id.into(),
            available_car,
            available_motor,
        }
    }
}

/// A description joined with at most one availability record.
///
/// Field precedence when merging:
///
/// | field                    | source                                   |
/// |--------------------------|------------------------------------------|
/// | `id`                     | description (availability id is equal)   |
/// | `name` .. `handicap_spot_count` | description, unchanged            |
/// | `available_car`          | availability, `Unknown` if no record     |
/// | `available_motor`        | availability, `Unknown` if no record     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedLotStatus {
    #[serde(flatten)]
    pub description: LotDescription,
    pub available_car: SpaceCount,
    pub available_motor: SpaceCount,
}

impl MergedLotStatus {
    pub fn id(&self) -> &str {
        &self.description.id
    }
}

/// Join a description with its availability record, if any.
///
/// The merged record always carries the description's id; an availability
/// record with a different id is ignored rather than mixed in.
pub fn merge(description: &LotDescription, availability: Option<&AvailabilityRecord>) -> MergedLotStatus {
    let availability = availability.filter(|a| a.id == description.id);
    MergedLotStatus {
        description: description.clone(),
        available_car: availability.map_or(SpaceCount::Unknown, |a| a.available_car),
        available_motor: availability.map_or(SpaceCount::Unknown, |a| a.available_motor),
    }
}
