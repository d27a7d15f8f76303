//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Query string of `GET /weather`.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    /// City name, empty means the fallback city
    pub city: Option<String>,
    /// Language code, absent means `EN`
    pub lang: Option<String>,
}

/// Form body of `POST /weather`.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherForm {
    /// City name, absent means the fallback city
    pub city: Option<String>,
    /// Language code
    pub lang: Option<String>,
}

/// Response for `POST /ping`.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    /// Always "pong"
    pub message: &'static str,
}
