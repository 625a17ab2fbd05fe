//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//! GET  /menu?category=&q=         - Menu with category tabs and search
//! GET  /menu/items/{id}/card      - Menu card fragment (HTMX, image navigation)
//! GET  /hakkimizda                - About page
//! GET  /iletisim                  - Contact page
//!
//! # JSON API
//! GET  /api/foods?category=       - Menu items, newest first
//! GET  /api/foods/{id}            - Single menu item
//! GET  /api/settings              - Site settings
//! ```

pub mod api;
pub mod home;
pub mod menu;
pub mod pages;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(api::list_foods))
        .route("/foods/{id}", get(api::get_food))
        .route("/settings", get(api::settings))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/menu", get(menu::index))
        .route("/menu/items/{id}/card", get(menu::card))
        .route("/hakkimizda", get(pages::about))
        .route("/iletisim", get(pages::contact))
        .nest("/api", api_routes())
}
