//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Static
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping).post(handlers::ping_json))
        .route("/user/:name", get(handlers::greet_user))

        // Weather
        .route(
            "/weather",
            get(handlers::weather_by_query).post(handlers::weather_by_form),
        )

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use parking_lot::Mutex;
    use tower::ServiceExt;

    use nimbus_core::error::{NimbusError, Result};
    use nimbus_core::traits::WeatherUpstream;
    use nimbus_core::types::{UpstreamSettings, WeatherRecord};

    use crate::state::ApiConfig;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    #[derive(Default)]
    struct FakeUpstream {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl WeatherUpstream for FakeUpstream {
        async fn current_by_name(&self, settings: &UpstreamSettings, city: &str) -> Result<WeatherRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .push((city.to_string(), settings.language.as_str().to_string()));
            if self.fail {
                return Err(NimbusError::HttpError("connection reset".into()));
            }
            let mut record = WeatherRecord {
                name: city.to_string(),
                ..Default::default()
            };
            record.main.temp = 15.0;
            Ok(record)
        }
    }

    fn test_app(upstream: Arc<FakeUpstream>) -> Router {
        let config = ApiConfig {
            api_key: KEY.into(),
            ..Default::default()
        };
        create_router(Arc::new(AppState::with_upstream(config, upstream)))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let response = test_app(Arc::default()).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Hello World!");
    }

    #[tokio::test]
    async fn test_ping_text() {
        let response = test_app(Arc::default()).oneshot(get("/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "pong");
    }

    #[tokio::test]
    async fn test_ping_json() {
        let response = test_app(Arc::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json, serde_json::json!({"message": "pong"}));
    }

    #[tokio::test]
    async fn test_user_greeting() {
        let response = test_app(Arc::default()).oneshot(get("/user/john")).await.unwrap();
        assert_eq!(body_text(response).await, "Hello john");
    }

    #[tokio::test]
    async fn test_weather_query_defaults_lang() {
        let upstream = Arc::new(FakeUpstream::default());
        let response = test_app(upstream.clone())
            .oneshot(get("/weather?city=London"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("\"London\""));
        assert!(body.contains("\"temp\": 15.0"));
        assert_eq!(
            upstream.seen.lock().as_slice(),
            &[("London".to_string(), "EN".to_string())]
        );
    }

    #[tokio::test]
    async fn test_weather_query_cached() {
        let upstream = Arc::new(FakeUpstream::default());
        let app = test_app(upstream.clone());

        let first = body_text(app.clone().oneshot(get("/weather?city=Rome&lang=it")).await.unwrap()).await;
        let second = body_text(app.oneshot(get("/weather?city=Rome")).await.unwrap()).await;

        assert_eq!(first, second);
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_weather_query_without_city() {
        let upstream = Arc::new(FakeUpstream::default());
        let response = test_app(upstream.clone()).oneshot(get("/weather")).await.unwrap();

        assert!(body_text(response).await.contains("Cortona"));
        assert_eq!(upstream.seen.lock()[0].0, "Cortona");
    }

    #[tokio::test]
    async fn test_weather_failure_is_200_with_error_text() {
        let upstream = Arc::new(FakeUpstream {
            fail: true,
            ..Default::default()
        });
        let response = test_app(upstream).oneshot(get("/weather?city=London")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_weather_form() {
        let upstream = Arc::new(FakeUpstream::default());
        let response = test_app(upstream.clone())
            .oneshot(post_form("/weather", "city=Oslo&lang=no"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"Oslo\""));
        assert_eq!(
            upstream.seen.lock().as_slice(),
            &[("Oslo".to_string(), "NO".to_string())]
        );
    }

    #[tokio::test]
    async fn test_weather_form_defaults() {
        let upstream = Arc::new(FakeUpstream::default());
        let response = test_app(upstream.clone())
            .oneshot(post_form("/weather", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            upstream.seen.lock().as_slice(),
            &[("Cortona".to_string(), "EN".to_string())]
        );
    }

    #[tokio::test]
    async fn test_weather_form_without_body() {
        let upstream = Arc::new(FakeUpstream::default());
        let response = test_app(upstream.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/weather")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_credential_reported() {
        let config = ApiConfig::default();
        let upstream = Arc::new(FakeUpstream::default());
        let app = create_router(Arc::new(AppState::with_upstream(config, upstream.clone())));

        let response = app.oneshot(get("/weather?city=London")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Invalid API key"));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }
}
