//! Public JSON API.
//!
//! Mirrors the shape the admin API returns so both can share clients.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use iolo_core::menu::{ALL_VALUE, FoodItem};
use iolo_core::{Category, FoodId, SiteSettings};

use crate::db::FoodRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FoodsQuery {
    pub category: Option<String>,
}

/// Parse the optional `category` filter. Blank and `All` mean no filter.
fn parse_category(raw: Option<&str>) -> Result<Option<Category>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL_VALUE) => Ok(None),
        Some(value) => value
            .parse::<Category>()
            .map(Some)
            .map_err(|e| AppError::BadRequest(e.to_string())),
    }
}

/// `GET /api/foods` - all items, newest first.
#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(params): Query<FoodsQuery>,
) -> Result<Json<Vec<FoodItem>>> {
    let category = parse_category(params.category.as_deref())?;
    let items = FoodRepository::new(state.pool()).list(category).await?;
    Ok(Json(items))
}

/// `GET /api/foods/{id}`
#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FoodItem>> {
    let id: FoodId = id.parse().map_err(|_| AppError::NotFound("Food not found"))?;
    match FoodRepository::new(state.pool()).get(id).await {
        Ok(item) => Ok(Json(item)),
        Err(crate::db::RepositoryError::NotFound) => Err(AppError::NotFound("Food not found")),
        Err(e) => Err(e.into()),
    }
}

/// `GET /api/settings` - never fails; see [`AppState::site_settings`].
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Json<SiteSettings> {
    Json(state.site_settings().await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some(" ")).unwrap(), None);
        assert_eq!(parse_category(Some("all")).unwrap(), None);
        assert_eq!(
            parse_category(Some("DRINK")).unwrap(),
            Some(Category::Drink)
        );
        assert!(matches!(
            parse_category(Some("SALAD")),
            Err(AppError::BadRequest(_))
        ));
    }
}
