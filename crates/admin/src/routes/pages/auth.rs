//! Login form and logout for the admin pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use crate::error::PageResult;
use crate::middleware::auth::{LOGIN_PATH, expired_session_cookie, session_cookie};
use crate::models::CurrentAdmin;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

const INVALID_LOGIN: &str = "E-posta veya şifre hatalı.";

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `GET /admin/login`
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        email: String::new(),
        error: None,
    }
}

/// `POST /admin/login`
///
/// Wrong credentials re-render the form with a 401; success stores the token
/// in the session cookie and opens the dashboard.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> PageResult<Response> {
    let retry = |email: String| {
        (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                email,
                error: Some(INVALID_LOGIN),
            },
        )
            .into_response()
    };

    if form.email.trim().is_empty() || form.password.is_empty() {
        return Ok(retry(form.email));
    }

    let user = match AuthService::new(state.pool()).login(&form.email, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => return Ok(retry(form.email)),
        Err(e) => return Err(e.into()),
    };

    let issued = state
        .tokens()
        .issue(&CurrentAdmin::from(&user), Utc::now())
        .map_err(AuthError::from)?;
    let cookie = session_cookie(
        &issued.token,
        state.config().token_ttl,
        state.config().secure_cookies,
    );

    tracing::info!(admin_id = %user.id, "Admin signed in to pages");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/admin")).into_response())
}

/// `POST /admin/logout`
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
        Redirect::to(LOGIN_PATH),
    )
}
