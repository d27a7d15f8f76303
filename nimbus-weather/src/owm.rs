//! OpenWeatherMap client implementation.
//!
//! Calls the v2.5 "current weather data" endpoint by city name.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use nimbus_core::constants::OWM_CURRENT_URL;
use nimbus_core::error::{NimbusError, Result};
use nimbus_core::traits::WeatherUpstream;
use nimbus_core::types::{UpstreamSettings, WeatherRecord};

/// OpenWeatherMap client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwmConfig {
    /// Full URL of the current weather endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OwmConfig {
    fn default() -> Self {
        Self {
            base_url: OWM_CURRENT_URL.into(),
            timeout_seconds: 10,
        }
    }
}

impl OwmConfig {
    /// Creates config pointing at a different endpoint (proxies, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    fn parsed_url(&self) -> Result<url::Url> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| NimbusError::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(NimbusError::ConfigError(format!(
                "unsupported URL scheme: {}",
                other
            ))),
        }
    }
}

/// Error body returned by the upstream API (`cod` is a string there).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpstreamFailure {
    message: String,
}

/// HTTP client for OpenWeatherMap.
#[derive(Clone, Debug)]
pub struct OwmClient {
    endpoint: url::Url,
    http_client: reqwest::Client,
}

impl OwmClient {
    /// Creates a client against the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(OwmConfig::default())
    }

    /// Creates a client with the given config.
    pub fn with_config(config: OwmConfig) -> Result<Self> {
        let endpoint = config.parsed_url()?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NimbusError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl WeatherUpstream for OwmClient {
    #[instrument(skip(self, settings), fields(lang = %settings.language))]
    async fn current_by_name(&self, settings: &UpstreamSettings, city: &str) -> Result<WeatherRecord> {
        let lang = settings.language.as_query();
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .query(&[
                ("q", city),
                ("units", settings.unit.as_query()),
                ("lang", lang.as_str()),
                ("APPID", settings.api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| NimbusError::HttpError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamFailure>(&text)
                .map(|f| f.message)
                .unwrap_or(text);
            return Err(NimbusError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let mut record: WeatherRecord = response
            .json()
            .await
            .map_err(|e| NimbusError::DecodeError(e.without_url().to_string()))?;

        record.unit = settings.unit.code().to_string();
        record.lang = settings.language.as_str().to_string();
        record.key = settings.api_key.expose().to_string();

        debug!(city, id = record.id, "Fetched current weather");
        Ok(record)
    }
}
