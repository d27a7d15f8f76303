//! App state: weather lookup, cache, config.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use nimbus_cache::{CacheConfig, TtlCache};
use nimbus_core::constants::{
    DEFAULT_CITY, DEFAULT_LANGUAGE, DEFAULT_PORT, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL,
    DEFAULT_UNIT, OWM_CURRENT_URL,
};
use nimbus_core::error::Result;
use nimbus_core::traits::WeatherUpstream;
use nimbus_weather::{LookupConfig, OwmClient, OwmConfig, WeatherLookup};

/// Process configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// OpenWeatherMap credential (`OWM_API_KEY`)
    pub api_key: String,
    /// Listening port (`PORT`)
    pub port: u16,
    /// Current weather endpoint (`OWM_BASE_URL`)
    pub owm_base_url: String,
    /// City used when none is given (`NIMBUS_FALLBACK_CITY`)
    pub fallback_city: String,
    /// Unit code for upstream calls (`NIMBUS_UNIT`)
    pub unit_code: String,
    /// Payload freshness (`NIMBUS_CACHE_TTL_SECS`)
    pub cache_ttl: Duration,
    /// Expiry sweep period (`NIMBUS_SWEEP_SECS`)
    pub sweep_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            port: DEFAULT_PORT,
            owm_base_url: OWM_CURRENT_URL.into(),
            fallback_city: DEFAULT_CITY.into(),
            unit_code: DEFAULT_UNIT.into(),
            cache_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            api_key: std::env::var("OWM_API_KEY").unwrap_or_default(),
            port: env_parse("PORT").unwrap_or(defaults.port),
            owm_base_url: std::env::var("OWM_BASE_URL").unwrap_or(defaults.owm_base_url),
            fallback_city: std::env::var("NIMBUS_FALLBACK_CITY")
                .ok()
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.fallback_city),
            unit_code: std::env::var("NIMBUS_UNIT").unwrap_or(defaults.unit_code),
            cache_ttl: env_parse("NIMBUS_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            sweep_interval: env_parse("NIMBUS_SWEEP_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
        }
    }

    fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            unit_code: self.unit_code.clone(),
            api_key: self.api_key.clone(),
            default_language: DEFAULT_LANGUAGE.into(),
            fallback_city: self.fallback_city.clone(),
            ttl: self.cache_ttl,
        }
    }

    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl: self.cache_ttl,
            sweep_interval: self.sweep_interval,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

/// Shared handler state.
pub struct AppState {
    /// Configuration the state was built from
    pub config: ApiConfig,
    /// Cached weather lookup
    pub lookup: WeatherLookup<dyn WeatherUpstream>,
}

impl AppState {
    /// Builds state backed by the OpenWeatherMap client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = OwmClient::with_config(OwmConfig::with_base_url(&config.owm_base_url))?;
        Ok(Self::with_upstream(config, Arc::new(client)))
    }

    /// Builds state over any upstream.
    pub fn with_upstream(config: ApiConfig, upstream: Arc<dyn WeatherUpstream>) -> Self {
        let cache = Arc::new(TtlCache::with_config(config.cache_config()));
        let lookup = WeatherLookup::new(cache, upstream, config.lookup_config());
        Self { config, lookup }
    }
}
