//! Cache-or-fetch weather lookup.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};

use nimbus_cache::TtlCache;
use nimbus_core::constants::{DEFAULT_CITY, DEFAULT_LANGUAGE, DEFAULT_TTL, DEFAULT_UNIT};
use nimbus_core::error::{NimbusError, Result};
use nimbus_core::traits::WeatherUpstream;
use nimbus_core::types::{UpstreamSettings, WeatherRecord};

/// Lookup configuration.
#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// Unit code for every upstream call
    pub unit_code: String,
    /// Upstream credential
    pub api_key: String,
    /// Used when the caller passes an empty language
    pub default_language: String,
    /// Used when the caller passes an empty city
    pub fallback_city: String,
    /// Freshness of a cached payload
    pub ttl: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            unit_code: DEFAULT_UNIT.into(),
            api_key: String::new(),
            default_language: DEFAULT_LANGUAGE.into(),
            fallback_city: DEFAULT_CITY.into(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl LookupConfig {
    /// Creates a config with the given credential and all other defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Resolves `(city, language)` to a rendered weather payload.
///
/// Payloads are cached per city (the language is not part of the key).
/// Only a payload whose settings, fetch and rendering all succeeded is
/// ever cached. Concurrent misses on one city may each call upstream; the
/// last write wins.
pub struct WeatherLookup<U: ?Sized> {
    cache: Arc<TtlCache<String>>,
    upstream: Arc<U>,
    config: LookupConfig,
}

impl<U: WeatherUpstream + ?Sized> WeatherLookup<U> {
    /// Creates a lookup over the given cache and upstream.
    pub fn new(cache: Arc<TtlCache<String>>, upstream: Arc<U>, config: LookupConfig) -> Self {
        Self {
            cache,
            upstream,
            config,
        }
    }

    /// Shared payload cache.
    pub fn cache(&self) -> &Arc<TtlCache<String>> {
        &self.cache
    }

    /// Active configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Returns the payload for `city` in `language`.
    ///
    /// Empty inputs fall back to the configured city and language. A cache
    /// hit is returned even when the upstream settings are invalid; on a miss
    /// that failure is returned instead of calling upstream.
    #[instrument(skip(self))]
    pub async fn lookup(&self, city: &str, language: &str) -> Result<String> {
        let language = if language.is_empty() {
            self.config.default_language.as_str()
        } else {
            language
        };
        let settings = UpstreamSettings::new(&self.config.unit_code, language, &self.config.api_key);
        if let Err(e) = &settings {
            warn!(error = %e, "Upstream client configuration failed");
        }

        let city = if city.is_empty() {
            self.config.fallback_city.as_str()
        } else {
            city
        };

        if let Some(payload) = self.cache.get(city) {
            info!(city, "Found weather in cache");
            return Ok(payload);
        }

        info!(city, "Weather not cached, fetching");
        let settings = settings?;

        let record = self
            .upstream
            .current_by_name(&settings, city)
            .await
            .inspect_err(|e| warn!(city, error = %e, "Upstream fetch failed"))?;

        let payload = render_payload(&record)
            .inspect_err(|e| warn!(city, error = %e, "Failed to render weather payload"))?;

        self.cache.set(city, payload.clone(), self.config.ttl);
        info!(city, "Cached weather");

        Ok(payload)
    }
}

/// Renders a record as pretty-printed JSON with four-space indentation.
pub fn render_payload(record: &WeatherRecord) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| NimbusError::SerializationError(e.to_string()))
}
