//! Reverse proxy for `/api/*`
//!
//! Requests are forwarded to the backend unchanged apart from hop-by-hop
//! headers; the backend owns authentication, persistence and validation.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap},
    response::Response,
};

use crate::error::{AppError, Result};
use crate::AppState;

/// Largest request body forwarded upstream
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that describe a single connection and must not be forwarded
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Forward one request to the backend and relay its response
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", state.config.api_backend_url, path_and_query);

    // the length limit is the only way a fully received body fails to collect
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::PayloadTooLarge {
            limit: MAX_BODY_BYTES,
        })?;

    tracing::debug!("Proxying {} {}", parts.method, url);

    let upstream = state
        .http
        .request(parts.method, &url)
        .headers(forwardable(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable(upstream.headers());
    let bytes = upstream.bytes().await?;

    if status.is_server_error() {
        tracing::warn!("Backend returned {} for {}", status, url);
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Copy of `headers` without hop-by-hop entries or a stale content length
fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in HOP_BY_HOP {
        filtered.remove(name);
    }
    filtered.remove(header::CONTENT_LENGTH);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        http::{HeaderValue, Method, StatusCode},
        response::Redirect,
        routing::{any, get, post},
        Router,
    };
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// Start a fake backend on an ephemeral port and return its base URL
    async fn spawn_backend() -> String {
        let backend = Router::new()
            .route(
                "/api/echo",
                any(|method: Method, headers: HeaderMap, body: String| async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    format!("{method} {auth} {body}")
                }),
            )
            .route(
                "/api/amenities",
                get(|| async { (StatusCode::CREATED, [("x-backend", "yes")], "[]") }),
            )
            .route("/api/login", post(|| async { Redirect::to("/api/home") }))
            .route("/api/home", get(|| async { "home" }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn proxy_app(backend_url: String) -> Router {
        let config = Config {
            api_backend_url: backend_url,
            ..Config::default()
        };
        Router::new()
            .route("/api/*rest", any(forward))
            .with_state(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_forward_preserves_method_headers_and_body() {
        let app = proxy_app(spawn_backend().await);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/echo?page=2")
                    .header(header::AUTHORIZATION, "Bearer resident")
                    .body(Body::from("hello"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"POST Bearer resident hello");
    }

    #[tokio::test]
    async fn test_forward_relays_status_and_headers() {
        let app = proxy_app(spawn_backend().await);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/amenities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-backend"], "yes");
    }

    #[tokio::test]
    async fn test_forward_relays_redirects_without_following() {
        let app = proxy_app(spawn_backend().await);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/login")
                    .body(Body::from("user=resident"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/api/home");
    }

    #[tokio::test]
    async fn test_forward_rejects_oversized_body() {
        let app = proxy_app(spawn_backend().await);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/echo")
                    .body(Body::from(vec![0u8; MAX_BODY_BYTES + 1]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_forward_unreachable_backend_is_bad_gateway() {
        // bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = proxy_app(format!("http://{addr}"));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/amenities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_forwardable_strips_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::HOST, HeaderValue::from_static("condo.local"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("5"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

        let filtered = forwardable(&headers);
        assert!(filtered.get(header::CONNECTION).is_none());
        assert!(filtered.get(header::HOST).is_none());
        assert!(filtered.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(filtered[header::COOKIE], "session=abc");
    }
}
