//! Current weather record.
//!
//! Mirrors the OpenWeatherMap "current weather data" body. Every field
//! defaults when absent so partial upstream answers still decode.

use serde::{Deserialize, Serialize};

/// Current conditions for one city.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherRecord {
    /// Geographic position
    pub coord: Coordinates,
    /// Country and daylight data
    pub sys: Sys,
    /// Internal upstream parameter
    pub base: String,
    /// Condition list (usually one element)
    pub weather: Vec<Condition>,
    /// Temperature, pressure and humidity
    pub main: MainReadings,
    /// Visibility in meters
    pub visibility: i64,
    /// Wind readings
    pub wind: Wind,
    /// Cloud cover
    pub clouds: Clouds,
    /// Rain volume
    pub rain: Precipitation,
    /// Snow volume
    pub snow: Precipitation,
    /// Unix time of the measurement
    pub dt: i64,
    /// Shift in seconds from UTC
    pub timezone: i64,
    /// Upstream city id
    pub id: i64,
    /// City name
    pub name: String,
    /// Upstream response code
    pub cod: i64,
    /// Unit code the record was requested with
    #[serde(rename = "Unit")]
    pub unit: String,
    /// Language the record was requested with
    #[serde(rename = "Lang")]
    pub lang: String,
    /// Credential the record was requested with. Never written to payloads.
    #[serde(rename = "Key", skip_serializing)]
    pub key: String,
}

/// Longitude and latitude.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// Location metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    /// Internal upstream parameter
    #[serde(rename = "type")]
    pub kind: i64,
    /// Internal upstream parameter
    pub id: i64,
    /// Internal upstream parameter
    pub message: f64,
    /// ISO 3166 country code
    pub country: String,
    /// Unix time of sunrise
    pub sunrise: i64,
    /// Unix time of sunset
    pub sunset: i64,
}

/// One entry of the condition list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    /// Upstream condition code
    pub id: i64,
    /// Category such as "Rain" or "Clouds"
    pub main: String,
    /// Condition text in the requested language
    pub description: String,
    /// Icon reference
    pub icon: String,
}

/// Temperature, pressure and humidity readings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    /// Current temperature
    pub temp: f64,
    /// Perceived temperature
    pub feels_like: f64,
    /// Minimum temperature across the city area
    pub temp_min: f64,
    /// Maximum temperature across the city area
    pub temp_max: f64,
    /// hPa
    pub pressure: f64,
    /// Pressure at sea level, hPa
    pub sea_level: f64,
    /// Pressure at ground level, hPa
    pub grnd_level: f64,
    /// Percent
    pub humidity: i64,
}

/// Wind readings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Speed in m/s (mph for Fahrenheit)
    pub speed: f64,
    /// Meteorological degrees
    pub deg: f64,
}

/// Cloud cover.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    /// Cloudiness in percent
    pub all: i64,
}

/// Precipitation volume over the last one and three hours, in mm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    /// Volume over the last hour
    #[serde(rename = "1h")]
    pub one_hour: f64,
    /// Volume over the last three hours
    #[serde(rename = "3h")]
    pub three_hours: f64,
}

impl WeatherRecord {
    /// Returns the first condition description, if any.
    pub fn summary(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }
}
