//! Configuration Module
//!
//! Handles loading the Pokedex settings from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the REST API, without trailing slash
    pub api_base_url: String,
    /// Cache TTL in milliseconds, also the reaper interval
    pub cache_ttl_ms: u64,
    /// Per-request timeout in seconds, 0 = no timeout
    pub request_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_TTL_MS` - Cache TTL in milliseconds (default: 5000)
    /// - `POKEDEX_REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("POKEDEX_API_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            cache_ttl_ms: env::var("POKEDEX_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_ms),
            request_timeout_secs: env::var("POKEDEX_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Points the client at another API root, e.g. a mock server.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl_ms: 5000,
            request_timeout_secs: 30,
        }
    }
}
