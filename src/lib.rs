//! Front-end server for the condo amenity booking site.
//!
//! Serves the compiled single-page app, forwards `/api/*` to the backend,
//! and exposes the booking window and fee calculations under `/booking`.

pub mod booking;
pub mod config;
pub mod error;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Client used to reach the backend API
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // redirects are relayed to the browser, never followed here
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.upstream_timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let static_files = routes::frontend::service(&state.config.static_dir);

    Router::new()
        .route("/health", get(health))
        .nest("/booking", booking::router())
        .route("/api/*rest", any(routes::proxy::forward))
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = app(AppState::new(Config::default()).unwrap());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_booking_routes_are_nested() {
        let app = app(AppState::new(Config::default()).unwrap());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/booking/fee")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"kind":"move","window":{"start":"2025-03-10T09:00","end":"2025-03-10T13:00"}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
