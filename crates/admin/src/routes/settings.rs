//! Site settings editing.

use axum::{Json, extract::State};
use tracing::instrument;

use iolo_core::SiteSettings;
use iolo_core::settings::SettingsUpdate;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::middleware::EditorSession;
use crate::state::AppState;

/// `GET /api/settings` - the stored row, or the built-in defaults before the first save.
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    let settings = SettingsRepository::new(state.pool())
        .get()
        .await?
        .unwrap_or_default();
    Ok(Json(settings))
}

/// `PUT /api/settings`
///
/// Fields absent from the body keep their current value; an empty string
/// clears an optional field. The first save creates the row.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    EditorSession(admin): EditorSession,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SiteSettings>> {
    let repo = SettingsRepository::new(state.pool());
    let current = repo.get().await?.unwrap_or_default();
    let saved = repo.upsert(&current.merged(update)).await?;

    tracing::info!("Site settings updated");
    Ok(Json(saved))
}
