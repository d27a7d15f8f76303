//! Validated settings for one upstream call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{API_KEY_LEN, SUPPORTED_LANGUAGES};
use crate::error::{NimbusError, Result};

/// Unit system for temperatures and wind speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Celsius, m/s
    #[default]
    Celsius,
    /// Fahrenheit, mph
    Fahrenheit,
    /// Kelvin, m/s
    Kelvin,
}

impl Unit {
    /// Parses a one-letter unit code (`C`, `F` or `K`).
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Unit::Celsius),
            "F" => Ok(Unit::Fahrenheit),
            "K" => Ok(Unit::Kelvin),
            other => Err(NimbusError::UnsupportedUnit(other.to_string())),
        }
    }

    /// One-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
            Unit::Kelvin => "K",
        }
    }

    /// Value of the upstream `units` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Unit::Celsius => "metric",
            Unit::Fahrenheit => "imperial",
            Unit::Kelvin => "standard",
        }
    }
}

/// Upstream language code, stored upper-case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Language(String);

impl Language {
    /// Parses a language code. Matching is case-insensitive.
    pub fn parse(code: &str) -> Result<Self> {
        let upper = code.trim().to_ascii_uppercase();
        if SUPPORTED_LANGUAGES.contains(&upper.as_str()) {
            Ok(Self(upper))
        } else {
            Err(NimbusError::UnsupportedLanguage(code.to_string()))
        }
    }

    /// Upper-case code, e.g. `EN`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the upstream `lang` query parameter.
    pub fn as_query(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upstream credential.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accepts exactly [`API_KEY_LEN`] ASCII alphanumeric characters.
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.len() != API_KEY_LEN || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(NimbusError::InvalidApiKey {
                expected: API_KEY_LEN,
                actual: key.chars().count(),
            });
        }
        Ok(Self(key.to_string()))
    }

    /// Raw key for the request query.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Everything an upstream call needs besides the city.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamSettings {
    /// Unit system
    pub unit: Unit,
    /// Response language
    pub language: Language,
    /// Credential
    pub api_key: ApiKey,
}

impl UpstreamSettings {
    /// Validates unit, language and key, in that order.
    pub fn new(unit_code: &str, language: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            unit: Unit::from_code(unit_code)?,
            language: Language::parse(language)?,
            api_key: ApiKey::parse(api_key)?,
        })
    }
}
