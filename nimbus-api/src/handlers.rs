//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Form, Json,
};
use tracing::debug;

use nimbus_core::constants::{DEFAULT_LANGUAGE, GREETING};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /
pub async fn root() -> &'static str {
    GREETING
}

/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// POST /ping
pub async fn ping_json() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

/// GET /user/:name
pub async fn greet_user(Path(name): Path<String>) -> String {
    format!("Hello {}", name)
}

/// GET /weather?city=&lang=
pub async fn weather_by_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<String> {
    let city = query.city.unwrap_or_default();
    let lang = query.lang.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    debug!(city = %city, lang = %lang, "Weather query");

    Ok(state.lookup.lookup(&city, &lang).await?)
}

/// POST /weather
///
/// A missing or non-form body behaves like an empty form.
pub async fn weather_by_form(
    State(state): State<Arc<AppState>>,
    form: Option<Form<WeatherForm>>,
) -> Result<String> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let city = form
        .city
        .unwrap_or_else(|| state.config.fallback_city.clone());
    let lang = form.lang.unwrap_or_default();
    debug!(city = %city, lang = %lang, "Weather form");

    Ok(state.lookup.lookup(&city, &lang).await?)
}
