use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::model::{AvailabilityRecord, LotDescription};
use super::wire::{RawAvailability, RawLotDescription};
use crate::config::ServerConfig;

/// JSON pointer to the per-lot record list in both upstream payloads.
pub const PARK_RECORDS_POINTER: &str = "/data/park";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} returned malformed JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{url} payload has no record list at {pointer}")]
    MissingPath { url: String, pointer: &'static str },
}

/// Read access to the two upstream datasets.
///
/// Implementations report every failure as a typed error; turning failures
/// into "no records" is the caller's decision.
#[async_trait]
pub trait ParkingSource: Send + Sync {
    async fn descriptions(&self) -> Result<Vec<LotDescription>, FetchError>;
    async fn availability(&self) -> Result<Vec<AvailabilityRecord>, FetchError>;
}

/// `ParkingSource` backed by the public TCMSV JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpParkingSource {
    client: reqwest::Client,
    descriptions_url: String,
    availability_url: String,
}

impl HttpParkingSource {
    pub fn new(config: &ServerConfig) -> Result<Self, FetchError> {
        Self::with_urls(
            config.descriptions_url.clone(),
            config.availability_url.clone(),
            config.fetch_timeout,
        )
    }

    pub fn with_urls(
        descriptions_url: impl Into<String>,
        availability_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mcp-tw-parking/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            descriptions_url: descriptions_url.into(),
            availability_url: availability_url.into(),
        })
    }

    /// GET `url` and return the raw records found under `data.park`.
    /// Elements that are not records are skipped.
    async fn fetch_records<T: DeserializeOwned + Send>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        debug!(url, "fetching parking dataset");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

        let mut payload: Value = serde_json::from_slice(&body)
            .map_err(|source| FetchError::Decode { url: url.to_string(), source })?;

        let records = match payload.pointer_mut(PARK_RECORDS_POINTER).map(Value::take) {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(FetchError::MissingPath {
                    url: url.to_string(),
                    pointer: PARK_RECORDS_POINTER,
                })
            }
        };

        // One unreadable element must not hide the rest of the dataset.
        let total = records.len();
        let parsed: Vec<T> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    debug!(url, error = %e, "skipping unreadable record");
                    None
                }
            })
            .collect();
        if parsed.len() < total {
            debug!(url, skipped = total - parsed.len(), "records skipped");
        }
        Ok(parsed)
    }
}

#[async_trait]
impl ParkingSource for HttpParkingSource {
    async fn descriptions(&self) -> Result<Vec<LotDescription>, FetchError> {
        let raw: Vec<RawLotDescription> = self.fetch_records(&self.descriptions_url).await?;
        let total = raw.len();
        let lots: Vec<_> = raw
            .into_iter()
            .filter_map(RawLotDescription::into_description)
            .collect();
        if lots.len() < total {
            debug!(skipped = total - lots.len(), "description records without id skipped");
        }
        Ok(lots)
    }

    async fn availability(&self) -> Result<Vec<AvailabilityRecord>, FetchError> {
        let raw: Vec<RawAvailability> = self.fetch_records(&self.availability_url).await?;
        Ok(raw
            .into_iter()
            .filter_map(RawAvailability::into_record)
            .collect())
    }
}
