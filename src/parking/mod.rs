pub mod cache;
pub mod engine;
pub mod model;
pub mod source;
pub mod wire;

pub use cache::{Clock, DescriptionCache, SystemClock};
pub use engine::QueryEngine;
pub use model::{merge, AvailabilityRecord, LotDescription, MergedLotStatus, SpaceCount};
pub use source::{FetchError, HttpParkingSource, ParkingSource};
