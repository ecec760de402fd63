use std::sync::Arc;

use crate::config::ServerConfig;
use crate::parking::{DescriptionCache, HttpParkingSource, ParkingSource, QueryEngine, SystemClock};

/// Shared state handed to every handler.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: QueryEngine,
}

impl AppState {
    /// State backed by the HTTP endpoints named in `config`.
    pub fn from_config(config: ServerConfig) -> Result<Self, crate::parking::FetchError> {
        let source = HttpParkingSource::new(&config)?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// State backed by an arbitrary source, honoring the configured cache TTL.
    pub fn with_source(config: ServerConfig, source: Arc<dyn ParkingSource>) -> Self {
        let cache = DescriptionCache::with_policy(config.descriptions_ttl, Arc::new(SystemClock));
        Self {
            engine: QueryEngine::with_cache(source, cache),
            config,
        }
    }
}
