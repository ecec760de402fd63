#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mcp_tw_parking::config::ServerConfig;
use mcp_tw_parking::parking::{
    AvailabilityRecord, FetchError, LotDescription, ParkingSource, QueryEngine, SpaceCount,
};
use mcp_tw_parking::state::AppState;

/// In-memory source that counts fetches. A `None` dataset simulates an
/// upstream failure.
#[derive(Default)]
pub struct FakeSource {
    descriptions: Mutex<Option<Vec<LotDescription>>>,
    availability: Mutex<Option<Vec<AvailabilityRecord>>>,
    pub description_fetches: AtomicUsize,
    pub availability_fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new(descriptions: Vec<LotDescription>, availability: Vec<AvailabilityRecord>) -> Arc<Self> {
        Arc::new(Self {
            descriptions: Mutex::new(Some(descriptions)),
            availability: Mutex::new(Some(availability)),
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_descriptions(&self, lots: Option<Vec<LotDescription>>) {
        *self.descriptions.lock().unwrap() = lots;
    }

    pub fn set_availability(&self, records: Option<Vec<AvailabilityRecord>>) {
        *self.availability.lock().unwrap() = records;
    }

    pub fn description_fetches(&self) -> usize {
        self.description_fetches.load(Ordering::SeqCst)
    }

    pub fn availability_fetches(&self) -> usize {
        self.availability_fetches.load(Ordering::SeqCst)
    }
}

fn upstream_down() -> FetchError {
    FetchError::Status {
        url: "http://fake.invalid".to_string(),
        status: 503,
    }
}

#[async_trait]
impl ParkingSource for FakeSource {
    async fn descriptions(&self) -> Result<Vec<LotDescription>, FetchError> {
        self.description_fetches.fetch_add(1, Ordering::SeqCst);
        self.descriptions.lock().unwrap().clone().ok_or_else(upstream_down)
    }

    async fn availability(&self) -> Result<Vec<AvailabilityRecord>, FetchError> {
        self.availability_fetches.fetch_add(1, Ordering::SeqCst);
        self.availability.lock().unwrap().clone().ok_or_else(upstream_down)
    }
}

pub fn lot(id: &str, name: &str, address: &str, area: &str) -> LotDescription {
    LotDescription {
        name: name.to_string(),
        address: address.to_string(),
        area: area.to_string(),
        ..LotDescription::new(id)
    }
}

pub fn free_cars(id: &str, cars: u32) -> AvailabilityRecord {
    AvailabilityRecord::new(id, SpaceCount::Known(cars), SpaceCount::Unknown)
}

/// A small Taipei fixture spanning three districts.
pub fn taipei_lots() -> Vec<LotDescription> {
    vec![
        LotDescription {
            total_car: Some(120),
            pay_info: "每小時40元".to_string(),
            charging_station_count: "4".to_string(),
            ..lot("001", "府前廣場地下停車場", "台北市信義區松壽路1號", "信義區")
        },
        lot("002", "松山高中停車場", "台北市信義區基隆路一段156號", "信義區"),
        lot("003", "大安森林公園地下停車場", "台北市大安區新生南路二段1號", "大安區"),
        lot("004", "敦化停車場", "台北市大安區仁愛路四段300號", "大安區"),
        lot("005", "仁愛國中停車場", "台北市中正區濟南路二段", "中正區"),
    ]
}

pub fn engine_with(source: Arc<FakeSource>) -> QueryEngine {
    QueryEngine::new(source)
}

pub fn state_with(source: Arc<FakeSource>) -> AppState {
    let config = ServerConfig {
        tool_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    };
    AppState::with_source(config, source)
}
