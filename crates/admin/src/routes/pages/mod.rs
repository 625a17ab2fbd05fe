//! Server-rendered admin pages.
//!
//! The same operations as the JSON API, behind a cookie session so editors
//! can work from a browser. Forms post `multipart/form-data` so images can be
//! uploaded together with the item.
//!
//! ```text
//! GET  /admin/login              - Login form
//! POST /admin/login              - Check credentials, set session cookie (rate limited)
//! POST /admin/logout             - Clear session cookie
//! GET  /admin                    - Dashboard           [session]
//! GET  /admin/foods              - Menu items          [session]
//! GET  /admin/foods/new          - New item form       [session]
//! POST /admin/foods/new          - Create item         [session, editor]
//! GET  /admin/foods/{id}/edit    - Edit form           [session]
//! POST /admin/foods/{id}/edit    - Save item           [session, editor]
//! POST /admin/foods/{id}/delete  - Delete item         [session, editor]
//! GET  /admin/settings           - About/contact text  [session]
//! POST /admin/settings           - Save settings       [session, editor]
//! ```

pub mod auth;
pub mod dashboard;
pub mod foods;
pub mod form;
pub mod settings;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::login_rate_limiter;
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::uploads::MAX_REQUEST_BYTES;

/// Signed-in admin shown in the page header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub email: String,
    pub role: String,
    pub can_edit: bool,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            email: admin.email.to_string(),
            role: admin.role.to_string(),
            can_edit: admin.can_edit(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Header and navigation shared by every signed-in page.
#[derive(Debug, Clone)]
pub struct LayoutView {
    pub admin_user: AdminUserView,
    pub nav: Vec<NavLink>,
}

impl LayoutView {
    #[must_use]
    pub fn new(admin: &CurrentAdmin, current_path: &str) -> Self {
        let nav = [
            ("/admin", "Panel"),
            ("/admin/foods", "Ürünler"),
            ("/admin/settings", "Hakkımızda & İletişim"),
        ]
        .into_iter()
        .map(|(href, label)| NavLink {
            href,
            label,
            active: href == current_path,
        })
        .collect();

        Self {
            admin_user: AdminUserView::from(admin),
            nav,
        }
    }
}

/// `?success=` flag left by a redirect after a successful form post.
#[derive(Debug, Default, Deserialize)]
pub struct Notice {
    pub success: Option<String>,
}

impl Notice {
    /// Message for a known flag; unknown values show nothing.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self.success.as_deref()? {
            "created" => Some("Ürün eklendi."),
            "saved" => Some("Değişiklikler kaydedildi."),
            "deleted" => Some("Ürün silindi."),
            _ => None,
        }
    }
}

/// Reject read-only admins before a form post changes anything.
pub(crate) fn require_editor(admin: &CurrentAdmin) -> Result<(), AppError> {
    if admin.can_edit() {
        Ok(())
    } else {
        tracing::warn!(admin_id = %admin.id, role = %admin.role, "Page edit attempt by read-only admin");
        Err(AppError::Forbidden)
    }
}

/// Build the `/admin` page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/login",
            get(auth::login_page).merge(post(auth::login).layer(login_rate_limiter())),
        )
        .route("/admin/logout", post(auth::logout))
        .route("/admin", get(dashboard::index))
        .route("/admin/foods", get(foods::index))
        .route(
            "/admin/foods/new",
            get(foods::new_page)
                .post(foods::create)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .route(
            "/admin/foods/{id}/edit",
            get(foods::edit_page)
                .post(foods::update)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .route("/admin/foods/{id}/delete", post(foods::delete))
        .route(
            "/admin/settings",
            get(settings::index)
                .post(settings::update)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
}
