//! Image uploads.

use axum::{
    Json,
    extract::{
        State,
        multipart::{Field, Multipart, MultipartError},
    },
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::EditorSession;
use crate::services::UploadError;
use crate::services::uploads::{IMAGE_FIELDS, MAX_UPLOAD_BYTES, is_image};
use crate::state::AppState;

/// Whole request body cap for `POST /api/upload`.
pub const MAX_REQUEST_BYTES: usize = 10 * MAX_UPLOAD_BYTES;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}

pub(crate) fn multipart_error(err: &MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge {
            max: MAX_UPLOAD_BYTES,
        }
    } else {
        UploadError::Multipart(err.body_text())
    }
}

/// Read a field, stopping as soon as it exceeds [`MAX_UPLOAD_BYTES`].
pub(crate) async fn read_limited(field: &mut Field<'_>) -> std::result::Result<Vec<u8>, UploadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(&e))? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                max: MAX_UPLOAD_BYTES,
            });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// `POST /api/upload`
///
/// Accepts `images` or `image` parts. Parts that are not images are
/// skipped; a request with none returns an empty list.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn upload(
    State(state): State<AppState>,
    EditorSession(admin): EditorSession,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut urls = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let wanted = field.name().is_some_and(|name| IMAGE_FIELDS.contains(&name));
        let content_type = field.content_type().map(str::to_owned);
        if !wanted || !is_image(content_type.as_deref()) {
            tracing::debug!(
                field = ?field.name(),
                content_type = ?content_type,
                "Skipping non-image part"
            );
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let bytes = read_limited(&mut field).await?;
        let url = state
            .uploads()
            .store(
                file_name.as_deref(),
                content_type.as_deref().unwrap_or_default(),
                &bytes,
            )
            .await?;
        urls.push(url);
    }

    tracing::info!(count = urls.len(), "Images uploaded");
    Ok(Json(UploadResponse { urls }))
}
