//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /api/auth/login        - Email/password login, returns bearer token (rate limited)
//! GET    /api/auth/me           - Current admin                          [bearer]
//!
//! # Menu
//! GET    /api/foods             - All items, including unavailable ones
//! POST   /api/foods             - Create item (201)                      [bearer, editor]
//! GET    /api/foods/{id}        - Single item
//! PUT    /api/foods/{id}        - Update item, omitted fields unchanged  [bearer, editor]
//! DELETE /api/foods/{id}        - Delete item                            [bearer, editor]
//!
//! # Site settings
//! GET    /api/settings          - Stored settings or defaults
//! PUT    /api/settings          - Merge and save                         [bearer, editor]
//!
//! # Uploads
//! POST   /api/upload            - Multipart images -> {"urls": [...]}    [bearer, editor]
//! ```
//!
//! The HTML pages under `/admin` are listed in [`pages`].

pub mod auth;
pub mod foods;
pub mod pages;
pub mod settings;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Create the `/api/auth` router. Only login is rate limited.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .layer(login_rate_limiter())
        .route("/me", get(auth::me))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .route("/api/foods", get(foods::list).post(foods::create))
        .route(
            "/api/foods/{id}",
            get(foods::get).put(foods::update).delete(foods::delete),
        )
        .route("/api/settings", get(settings::get).put(settings::update))
        .route(
            "/api/upload",
            post(uploads::upload).layer(DefaultBodyLimit::max(uploads::MAX_REQUEST_BYTES)),
        )
        .merge(pages::router())
}
