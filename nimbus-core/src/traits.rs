//! Common traits for Nimbus.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{UpstreamSettings, WeatherRecord};

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of current weather conditions.
///
/// Implementations might use:
/// - The OpenWeatherMap HTTP API (production)
/// - A canned record (tests)
#[async_trait]
pub trait WeatherUpstream: Send + Sync {
    /// Fetches current conditions for `city` using the given unit, language and key.
    async fn current_by_name(&self, settings: &UpstreamSettings, city: &str)
        -> Result<WeatherRecord>;
}
