//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use iolo_core::menu::Carousel;
use iolo_core::{Category, SiteSettings};

use super::menu::FoodCardView;
use crate::db::FoodRepository;
use crate::state::AppState;

/// Number of pizzas shown in the "popular" strip.
const POPULAR_COUNT: i64 = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site: SiteSettings,
    /// First available pizzas on the menu.
    pub popular: Vec<FoodCardView>,
}

/// Display the home page.
///
/// The popular strip is left empty if the menu cannot be read.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let popular = FoodRepository::new(state.pool())
        .featured(Category::Pizza, POPULAR_COUNT)
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch popular pizzas: {e}");
                Vec::new()
            },
            |items| {
                items
                    .iter()
                    .map(|item| FoodCardView::new(item, Carousel::new(item.images.len())))
                    .collect()
            },
        );

    HomeTemplate {
        site: state.site_settings().await,
        popular,
    }
}
