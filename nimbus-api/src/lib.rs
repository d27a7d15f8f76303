//! # Nimbus API Server
//!
//! Plain-text HTTP front end over the cached weather lookup.
//!
//! ## Endpoints
//!
//! - `GET /` - Greeting
//! - `GET /ping` - `pong` as text
//! - `POST /ping` - `pong` as JSON
//! - `GET /user/:name` - Personal greeting
//! - `GET /weather?city=&lang=` - Weather payload for a city
//! - `POST /weather` (form `city`, `lang`) - Same, from form fields
//!
//! Weather routes always answer 200; a failed lookup yields its error text.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nimbus_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use nimbus_core::error::Result;

/// API server for Nimbus.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server backed by OpenWeatherMap.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Creates a server over prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the cache sweeper and serves on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let sweeper = self.state.lookup.cache().spawn_sweeper();
        info!("Nimbus listening on {}", addr);

        let served = axum::serve(listener, self.router()).await;
        sweeper.abort();
        served
    }
}
