//! Defaults for the weather lookup and the HTTP front end.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Language used when the caller supplies none.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// City used when the caller supplies none.
pub const DEFAULT_CITY: &str = "Cortona";

/// Unit code for upstream requests (Celsius).
pub const DEFAULT_UNIT: &str = "C";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TIMING
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a cached payload stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// How often the background sweeper drops expired entries.
/// Longer than [`DEFAULT_TTL`]; `get` never relies on the sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Length of an OpenWeatherMap API key.
pub const API_KEY_LEN: usize = 32;

/// OpenWeatherMap "current weather" endpoint.
pub const OWM_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Languages accepted by the upstream API.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "AF", "AL", "AR", "AZ", "BG", "CA", "CZ", "DA", "DE", "EL", "EN", "ES", "EU", "FA", "FI",
    "FR", "GL", "HE", "HI", "HR", "HU", "ID", "IT", "JA", "KR", "LA", "LT", "MK", "NL", "NO",
    "PL", "PT", "PT_BR", "RO", "RU", "SE", "SK", "SL", "SP", "SR", "SV", "TH", "TR", "UA", "UK",
    "VI", "ZH_CN", "ZH_TW", "ZU",
];

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP FRONT END
// ═══════════════════════════════════════════════════════════════════════════════

/// Listening port unless `PORT` overrides it.
pub const DEFAULT_PORT: u16 = 8080;

/// Body of `GET /`.
pub const GREETING: &str = "Hello World!";
