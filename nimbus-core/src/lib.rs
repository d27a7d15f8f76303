//! # Nimbus Core
//!
//! Core types, errors, and traits shared by every Nimbus crate:
//!
//! - **Types**: the upstream weather record and the settings an upstream call needs
//! - **Errors**: a single error enum classified into lookup failure kinds
//! - **Constants**: defaults for language, city, TTL and port
//! - **Traits**: the [`WeatherUpstream`] seam used by the lookup service
//!
//! ## Example
//!
//! ```rust
//! use nimbus_core::{UpstreamSettings, DEFAULT_LANGUAGE, DEFAULT_UNIT};
//!
//! let settings = UpstreamSettings::new(DEFAULT_UNIT, DEFAULT_LANGUAGE, "0123456789abcdef0123456789abcdef")
//!     .unwrap();
//! assert_eq!(settings.language.as_str(), "EN");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{ErrorKind, NimbusError, Result};
pub use traits::*;
pub use types::*;
