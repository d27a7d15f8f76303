//! Domain types for Nimbus.
//!
//! - [`WeatherRecord`]: current conditions as returned by the upstream API
//! - [`UpstreamSettings`]: validated unit, language and credential for one call

mod record;
mod settings;

pub use record::*;
pub use settings::*;
