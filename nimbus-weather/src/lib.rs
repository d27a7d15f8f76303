//! # Nimbus Weather
//!
//! Upstream access and the cached weather lookup.
//!
//! - [`OwmClient`]: OpenWeatherMap "current weather" over HTTP
//! - [`WeatherLookup`]: returns a cached payload for a city or fetches, renders
//!   and caches a fresh one

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod lookup;
pub mod owm;

pub use lookup::{render_payload, LookupConfig, WeatherLookup};
pub use owm::{OwmClient, OwmConfig};
