//! Authentication extractors for admin.
//!
//! Handlers declare what they need by argument type:
//!
//! ```rust,ignore
//! async fn delete_food(EditorSession(admin): EditorSession, ...) -> Result<...> {
//!     // only reached with a valid token for a role that can edit
//! }
//! ```
//!
//! The JSON API reads a bearer token. The HTML pages under `/admin` read the
//! same token from the [`SESSION_COOKIE`] set by the login form, and send
//! visitors without one to the login page.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
    response::Redirect,
};
use chrono::{Duration, Utc};

use crate::error::AppError;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Any authenticated admin. Rejects with 401 when the bearer token is
/// missing, malformed, forged or expired.
#[derive(Debug, Clone)]
pub struct AdminSession(pub CurrentAdmin);

/// An authenticated admin whose role may edit. Viewers get 403.
#[derive(Debug, Clone)]
pub struct EditorSession(pub CurrentAdmin);

/// A signed-in admin on an HTML page. Redirects to the login form otherwise.
#[derive(Debug, Clone)]
pub struct PageSession(pub CurrentAdmin);

/// Cookie carrying the page session token.
pub const SESSION_COOKIE: &str = "iolo_admin";

/// Where pages send visitors without a valid session.
pub const LOGIN_PATH: &str = "/admin/login";

/// `Set-Cookie` value storing `token` for `ttl`. `secure` adds the `Secure`
/// attribute and should be set whenever the admin is served over HTTPS.
#[must_use]
pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/admin; Max-Age={}; HttpOnly; SameSite=Strict",
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/admin; Max-Age=0; HttpOnly; SameSite=Strict")
}

/// Extract the session token from the `Cookie` headers.
fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// Extract the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Set the Sentry user context for the rest of the request.
fn set_sentry_user(admin: &CurrentAdmin) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin.id.to_string()),
            email: Some(admin.email.to_string()),
            ..Default::default()
        }));
    });
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let claims = state.tokens().verify(token, Utc::now()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })?;

        let admin = CurrentAdmin::from(claims);
        set_sentry_user(&admin);
        Ok(Self(admin))
    }
}

impl FromRequestParts<AppState> for EditorSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AdminSession(admin) = AdminSession::from_request_parts(parts, state).await?;

        if !admin.can_edit() {
            tracing::warn!(admin_id = %admin.id, role = %admin.role, "Edit attempt by read-only admin");
            return Err(AppError::Forbidden);
        }

        Ok(Self(admin))
    }
}

impl FromRequestParts<AppState> for PageSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie_token(&parts.headers).ok_or_else(|| Redirect::to(LOGIN_PATH))?;

        let claims = state.tokens().verify(token, Utc::now()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session cookie");
            Redirect::to(LOGIN_PATH)
        })?;

        let admin = CurrentAdmin::from(claims);
        set_sentry_user(&admin);
        Ok(Self(admin))
    }
}
