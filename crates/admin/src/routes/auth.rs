//! Login and current-admin routes.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::AdminSession;
use crate::models::{AdminUser, CurrentAdmin};
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body. Fields are optional so a missing one is a 400 with
/// a JSON error rather than a deserialization rejection.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AdminUser,
}

/// `POST /api/auth/login`
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        request.email.filter(|e| !e.trim().is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let user = AuthService::new(state.pool())
        .login(&email, &password)
        .await?;

    let issued = state
        .tokens()
        .issue(&CurrentAdmin::from(&user), Utc::now())
        .map_err(crate::services::AuthError::from)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user,
    }))
}

/// `GET /api/auth/me`
///
/// Looks the admin up again so a deleted account stops working here even
/// while its token is unexpired.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn me(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
) -> Result<Json<AdminUser>> {
    let user = AdminUserRepository::new(state.pool())
        .get_by_id(admin.id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user))
}
