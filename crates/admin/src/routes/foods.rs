//! Menu item management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use iolo_core::FoodId;
use iolo_core::menu::{FoodInput, FoodItem};

use crate::db::{FoodRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::EditorSession;
use crate::state::AppState;

const FOOD_NOT_FOUND: &str = "Food not found";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// An id that does not parse can't exist, so it is a 404 like any other miss.
pub(crate) fn parse_id(raw: &str) -> Result<FoodId> {
    raw.parse().map_err(|_| AppError::NotFound(FOOD_NOT_FOUND))
}

pub(crate) fn not_found_as_food(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound(FOOD_NOT_FOUND),
        other => other.into(),
    }
}

/// `GET /api/foods` - every item including unavailable ones, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FoodItem>>> {
    let items = FoodRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// `GET /api/foods/{id}`
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<FoodItem>> {
    let id = parse_id(&id)?;
    let item = FoodRepository::new(state.pool())
        .get(id)
        .await
        .map_err(not_found_as_food)?;
    Ok(Json(item))
}

/// `POST /api/foods`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    EditorSession(admin): EditorSession,
    Json(input): Json<FoodInput>,
) -> Result<(StatusCode, Json<FoodItem>)> {
    let draft = input.validate()?;
    let item = FoodRepository::new(state.pool()).create(&draft).await?;

    tracing::info!(food_id = %item.id, name = %item.name, "Food created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/foods/{id}` - fields left out of the body keep their stored value.
#[instrument(skip_all, fields(admin_id = %admin.id, food_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    EditorSession(admin): EditorSession,
    Path(id): Path<String>,
    Json(input): Json<FoodInput>,
) -> Result<Json<FoodItem>> {
    let id = parse_id(&id)?;
    let repo = FoodRepository::new(state.pool());
    let current = repo.get(id).await.map_err(not_found_as_food)?;
    let draft = input.validate_onto(&current)?;
    let item = repo.replace(id, &draft).await.map_err(not_found_as_food)?;

    tracing::info!(food_id = %item.id, "Food updated");
    Ok(Json(item))
}

/// `DELETE /api/foods/{id}`
#[instrument(skip_all, fields(admin_id = %admin.id, food_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    EditorSession(admin): EditorSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    FoodRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(not_found_as_food)?;

    tracing::info!(food_id = %id, "Food deleted");
    Ok(Json(MessageResponse {
        message: "Food deleted successfully",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = FoodId::generate();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("margarita"),
            Err(AppError::NotFound(FOOD_NOT_FOUND))
        ));
    }

    #[test]
    fn test_not_found_maps_to_food_message() {
        assert!(matches!(
            not_found_as_food(RepositoryError::NotFound),
            AppError::NotFound(FOOD_NOT_FOUND)
        ));
        assert!(matches!(
            not_found_as_food(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
            AppError::Database(_)
        ));
    }
}
