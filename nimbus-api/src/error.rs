//! API error handling.
//!
//! Lookup failures never change the status code: the client gets 200 with
//! the error text as body, the server log gets the details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nimbus_core::error::NimbusError;

/// A failed weather lookup, rendered as a 200 plain-text response.
#[derive(Debug)]
pub struct ApiError(NimbusError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self.0, kind = ?self.0.kind(), "Weather lookup failed");
        (StatusCode::OK, self.0.to_string()).into_response()
    }
}

impl From<NimbusError> for ApiError {
    fn from(err: NimbusError) -> Self {
        ApiError(err)
    }
}
