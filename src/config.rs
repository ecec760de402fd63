use std::time::Duration;

/// Taipei City parking lot descriptions (near-static).
pub const DEFAULT_DESCRIPTIONS_URL: &str =
    "https://tcgbusfs.blob.core.windows.net/blobtcmsv/TCMSV_alldesc.json";

/// Taipei City real-time parking availability.
pub const DEFAULT_AVAILABILITY_URL: &str =
    "https://tcgbusfs.blob.core.windows.net/blobtcmsv/TCMSV_allavailable.json";

/// Default upstream HTTP timeout (10 seconds).
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default timeout for tool operations (30 seconds).
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub descriptions_url: String,
    pub availability_url: String,
    pub fetch_timeout: Duration,
    /// `None` keeps a description snapshot for the life of the process.
    pub descriptions_ttl: Option<Duration>,
    pub tool_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            descriptions_url: DEFAULT_DESCRIPTIONS_URL.to_string(),
            availability_url: DEFAULT_AVAILABILITY_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            descriptions_ttl: None,
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `PARKING_DESC_URL` (optional) - description endpoint
    /// - `PARKING_AVAIL_URL` (optional) - availability endpoint
    /// - `PARKING_FETCH_TIMEOUT_SECS` (optional, default 10) - upstream HTTP timeout
    /// - `PARKING_DESC_TTL_SECS` (optional, unset or 0 = never expire) - description cache TTL
    /// - `PARKING_TOOL_TIMEOUT_SECS` (optional, default 30) - max seconds per tool call
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let descriptions_url = lookup("PARKING_DESC_URL").unwrap_or(defaults.descriptions_url);
        let availability_url = lookup("PARKING_AVAIL_URL").unwrap_or(defaults.availability_url);

        let fetch_timeout_secs = match lookup("PARKING_FETCH_TIMEOUT_SECS") {
            Some(val) => parse_positive(&val)
                .ok_or_else(|| "PARKING_FETCH_TIMEOUT_SECS must be a positive integer".to_string())?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let descriptions_ttl = match lookup("PARKING_DESC_TTL_SECS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err("PARKING_DESC_TTL_SECS must be a non-negative integer".to_string())
                }
            },
            None => None,
        };

        let tool_timeout_secs = match lookup("PARKING_TOOL_TIMEOUT_SECS") {
            Some(val) => parse_positive(&val)
                .ok_or_else(|| "PARKING_TOOL_TIMEOUT_SECS must be a positive integer".to_string())?,
            None => DEFAULT_TOOL_TIMEOUT_SECS,
        };

        Ok(Self {
            descriptions_url,
            availability_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            descriptions_ttl,
            tool_timeout: Duration::from_secs(tool_timeout_secs),
        })
    }
}

fn parse_positive(val: &str) -> Option<u64> {
    val.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
