//! İolo Storefront library.
//!
//! This crate provides the public site as a library so the router can be
//! tested without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Directory holding CSS and images, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config().upload_dir);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .nest_service("/uploads", uploads)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_state() -> AppState {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://iolo@127.0.0.1:1/iolo"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            upload_dir: PathBuf::from("uploads"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = db::create_lazy_pool(&config.database_url).unwrap();
        AppState::new(config, pool)
    }

    /// Same as `test_state`, but database calls give up quickly.
    fn unreachable_db_state() -> AppState {
        let state = test_state();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://iolo@127.0.0.1:1/iolo")
            .unwrap();
        AppState::new(state.config().clone(), pool)
    }

    #[tokio::test]
    async fn test_health_ok_with_request_id() {
        let response = app(test_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app(test_state())
            .oneshot(axum::http::Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_food_id_is_not_found_without_database() {
        let response = app(test_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/foods/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Food not found");
    }

    #[tokio::test]
    async fn test_invalid_category_rejected_without_database() {
        let response = app(test_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/foods?category=SALAD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_menu_load_failure_shows_retry() {
        let response = app(unreachable_db_state())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/menu?category=PIZZA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(routes::menu::LOAD_ERROR_TEXT));
        assert!(html.contains(routes::menu::RETRY_TEXT));
        assert!(html.contains(r#"href="/menu?category=PIZZA""#));
        assert!(!html.contains(routes::menu::NO_RESULTS_TEXT));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(test_state())
            .oneshot(axum::http::Request::builder().uri("/sepet").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
