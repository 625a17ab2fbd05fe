//! Unified error handling for admin.
//!
//! Every API error renders as `{"error": "..."}`; page handlers wrap the same
//! error in [`PageError`] to get an HTML page instead. Server errors are
//! captured to Sentry and their details are never sent to the client.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use iolo_core::menu::FoodValidationError;

use crate::db::RepositoryError;
use crate::services::{AuthError, UploadError};

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Login or account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Upload could not be accepted or stored.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Food payload failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] FoodValidationError),

    /// Resource not found. The message is shown to the client.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// Missing, malformed or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed to edit.
    #[error("Forbidden")]
    Forbidden,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub(crate) const fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) | Self::Auth(AuthError::UserAlreadyExists) => {
                StatusCode::CONFLICT
            }
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::InvalidEmail(_) | AuthError::WeakPassword(_))
            | Self::Upload(UploadError::Multipart(_))
            | Self::Validation(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Auth(_) | Self::Upload(UploadError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub(crate) fn public_message(&self) -> String {
        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::Auth(err @ (AuthError::InvalidEmail(_) | AuthError::WeakPassword(_))) => {
                err.to_string()
            }
            Self::Auth(AuthError::UserAlreadyExists) => "User already exists".to_string(),
            Self::Upload(UploadError::TooLarge { max }) => {
                format!("File too large (max {} MB)", max / (1024 * 1024))
            }
            Self::Upload(UploadError::Multipart(msg)) => msg.clone(),
            Self::Upload(UploadError::Io(_)) => "Failed to upload files".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::NotFound(what) => (*what).to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::Forbidden => "Forbidden".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Database(_) | Self::Auth(_) => "Internal server error".to_string(),
        }
    }
}

impl AppError {
    /// Capture server errors to Sentry and log them.
    fn report(&self) {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// An [`AppError`] raised by an HTML page handler.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl<E: Into<AppError>> From<E> for PageError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.report();
        let status = err.status();
        let page = ErrorTemplate {
            status: status.as_u16(),
            message: err.public_message(),
        };
        (status, page).into_response()
    }
}

/// Result type alias for page handlers.
pub type PageResult<T> = std::result::Result<T, PageError>;
