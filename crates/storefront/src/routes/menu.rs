//! Menu page and the HTMX card fragment used for image navigation.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use iolo_core::menu::{
    Carousel, CategoryFilter, FoodItem, MenuDisplay, MenuFilter, MenuPage, SearchQuery, Step,
};
use iolo_core::{FoodId, SiteSettings};

use crate::db::FoodRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shown when the filters leave nothing to display.
pub const NO_RESULTS_TEXT: &str = "Aradığınız kriterlere uygun ürün bulunamadı.";

/// Shown when the menu could not be loaded.
pub const LOAD_ERROR_TEXT: &str = "Menü yüklenirken bir hata oluştu.";

/// Label of the retry link on the error state.
pub const RETRY_TEXT: &str = "Tekrar Dene";

// =============================================================================
// Views
// =============================================================================

/// Carousel position marker.
#[derive(Clone)]
pub struct DotView {
    pub index: usize,
    pub active: bool,
}

/// Everything a menu card needs to render.
#[derive(Clone)]
pub struct FoodCardView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub category_label: &'static str,
    pub ingredients: String,
    pub image_url: String,
    pub image_index: usize,
    pub has_controls: bool,
    pub dots: Vec<DotView>,
    pub spicy: bool,
    pub vegetarian: bool,
}

impl FoodCardView {
    #[must_use]
    pub fn new(item: &FoodItem, carousel: Carousel) -> Self {
        let tags = item.tags();
        let dots = if carousel.has_controls() {
            (0..carousel.len())
                .map(|index| DotView {
                    index,
                    active: index == carousel.index(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.display(),
            category_label: item.category.label(),
            ingredients: item.ingredients_line(),
            image_url: carousel.current_image(&item.images).to_string(),
            image_index: carousel.index(),
            has_controls: carousel.has_controls(),
            dots,
            spicy: tags.spicy,
            vegetarian: tags.vegetarian,
        }
    }
}

/// A category tab.
#[derive(Clone)]
pub struct TabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Build a `/menu` link preserving the search text.
fn menu_href(category: CategoryFilter, search: &SearchQuery) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if category != CategoryFilter::All {
        query.append_pair("category", category.query_value());
    }
    if !search.is_blank() {
        query.append_pair("q", search.as_str());
    }
    let query = query.finish();
    if query.is_empty() {
        "/menu".to_string()
    } else {
        format!("/menu?{query}")
    }
}

// =============================================================================
// Menu Page
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub q: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub site: SiteSettings,
    pub tabs: Vec<TabView>,
    pub category: String,
    pub search: String,
    pub cards: Vec<FoodCardView>,
    pub load_failed: bool,
    pub no_results: bool,
    pub retry_href: String,
    pub no_results_text: &'static str,
    pub load_error_text: &'static str,
    pub retry_text: &'static str,
}

/// Display the menu, filtered by `category` and `q`.
///
/// A failed load renders the error state with a retry link instead of an
/// error response.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(params): Query<MenuQuery>) -> MenuTemplate {
    // Surrounding spaces typed into the search box are not part of the query
    let filter = MenuFilter::new(params.category, SearchQuery::new(params.q.trim()));

    let mut page = MenuPage::new();
    if let Some(ticket) = page.begin_load() {
        let loaded = FoodRepository::new(state.pool()).list(None).await;
        if let Err(e) = &loaded {
            tracing::error!(error = %e, "Failed to load menu");
        }
        page.resolve(ticket, loaded);
    }

    let tabs = page
        .tabs()
        .into_iter()
        .map(|tab| TabView {
            label: tab.label(),
            href: menu_href(tab, &filter.search),
            active: tab == filter.category,
        })
        .collect();

    let (cards, load_failed, no_results) = match page.display(&filter) {
        MenuDisplay::Results(items) => (
            items
                .into_iter()
                .map(|item| FoodCardView::new(item, Carousel::new(item.images.len())))
                .collect(),
            false,
            false,
        ),
        MenuDisplay::NoResults => (Vec::new(), false, true),
        MenuDisplay::Error(_) | MenuDisplay::Loading => (Vec::new(), true, false),
    };

    MenuTemplate {
        site: state.site_settings().await,
        tabs,
        category: filter.category.query_value().to_string(),
        search: filter.search.as_str().to_string(),
        cards,
        load_failed,
        no_results,
        retry_href: menu_href(filter.category, &filter.search),
        no_results_text: NO_RESULTS_TEXT,
        load_error_text: LOAD_ERROR_TEXT,
        retry_text: RETRY_TEXT,
    }
}

// =============================================================================
// Card Fragment (HTMX)
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CardQuery {
    /// Index currently displayed by the client.
    #[serde(default)]
    pub image: usize,
    /// Move from `image`; absent means jump to `image`.
    pub step: Option<Step>,
}

#[derive(Template, WebTemplate)]
#[template(path = "partials/menu_card.html")]
pub struct MenuCardTemplate {
    pub card: FoodCardView,
}

/// Render one card at a new carousel position.
#[instrument(skip(state))]
pub async fn card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CardQuery>,
) -> Result<MenuCardTemplate> {
    let id: FoodId = id.parse().map_err(|_| AppError::NotFound("Food not found"))?;
    let item = FoodRepository::new(state.pool()).get(id).await?;
    if !item.is_available {
        return Err(AppError::NotFound("Food not found"));
    }

    let mut carousel = Carousel::at(item.images.len(), params.image);
    if let Some(step) = params.step {
        carousel.step(step);
    }

    Ok(MenuCardTemplate {
        card: FoodCardView::new(&item, carousel),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use iolo_core::{Category, Price};

    use super::*;

    fn margarita() -> FoodItem {
        FoodItem {
            id: FoodId::new(uuid::Uuid::nil()),
            name: "Klasik Margarita".to_string(),
            description: Some("İtalyan klasiği".to_string()),
            price: Price::parse("149.99").unwrap(),
            category: Category::Pizza,
            ingredients: vec!["Domates Sosu".to_string(), "Mozarella".to_string()],
            images: vec!["/uploads/a.jpg".to_string(), "/uploads/b.jpg".to_string()],
            is_available: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_card_view_with_controls() {
        let mut carousel = Carousel::new(2);
        carousel.next();
        let view = FoodCardView::new(&margarita(), carousel);
        assert_eq!(view.image_url, "/uploads/b.jpg");
        assert!(view.has_controls);
        assert_eq!(view.dots.len(), 2);
        assert!(view.dots[1].active);
        assert_eq!(view.price, "149.99 ₺");
        assert!(view.vegetarian);
    }

    #[test]
    fn test_card_view_without_images_uses_placeholder() {
        let mut item = margarita();
        item.images.clear();
        let view = FoodCardView::new(&item, Carousel::new(0));
        assert_eq!(view.image_url, iolo_core::menu::PLACEHOLDER_IMAGE);
        assert!(!view.has_controls);
        assert!(view.dots.is_empty());
    }

    #[test]
    fn test_menu_href_keeps_search() {
        let search = SearchQuery::new("acı sucuk");
        assert_eq!(
            menu_href(CategoryFilter::Only(Category::Pizza), &search),
            "/menu?category=PIZZA&q=ac%C4%B1+sucuk"
        );
        assert_eq!(
            menu_href(CategoryFilter::All, &SearchQuery::default()),
            "/menu"
        );
    }

    #[test]
    fn test_card_template_renders_navigation() {
        let html = MenuCardTemplate {
            card: FoodCardView::new(&margarita(), Carousel::new(2)),
        }
        .render()
        .unwrap();
        assert!(html.contains("step=next"));
        assert!(html.contains("step=prev"));
        assert!(html.contains("Klasik Margarita"));
    }

    #[test]
    fn test_single_image_card_has_no_navigation() {
        let mut item = margarita();
        item.images.truncate(1);
        let html = MenuCardTemplate {
            card: FoodCardView::new(&item, Carousel::new(item.images.len())),
        }
        .render()
        .unwrap();
        assert!(html.contains("/uploads/a.jpg"));
        assert!(!html.contains("step="));
        assert!(!html.contains("carousel-dots"));
    }

    fn page(cards: Vec<FoodCardView>, load_failed: bool, no_results: bool) -> MenuTemplate {
        MenuTemplate {
            site: SiteSettings::default(),
            tabs: Vec::new(),
            category: "ALL".to_string(),
            search: "lahmacun".to_string(),
            cards,
            load_failed,
            no_results,
            retry_href: "/menu?q=lahmacun".to_string(),
            no_results_text: NO_RESULTS_TEXT,
            load_error_text: LOAD_ERROR_TEXT,
            retry_text: RETRY_TEXT,
        }
    }

    #[test]
    fn test_no_results_state() {
        let html = page(Vec::new(), false, true).render().unwrap();
        assert!(html.contains(NO_RESULTS_TEXT));
        assert!(!html.contains(LOAD_ERROR_TEXT));
        assert!(!html.contains(RETRY_TEXT));
        assert!(html.contains(r#"value="lahmacun""#));
    }

    #[test]
    fn test_error_state_offers_retry() {
        let html = page(Vec::new(), true, false).render().unwrap();
        assert!(html.contains(LOAD_ERROR_TEXT));
        assert!(html.contains(RETRY_TEXT));
        assert!(!html.contains(NO_RESULTS_TEXT));
    }

    #[test]
    fn test_results_render_cards() {
        let card = FoodCardView::new(&margarita(), Carousel::new(2));
        let html = page(vec![card], false, false).render().unwrap();
        assert!(html.contains("card-00000000-0000-0000-0000-000000000000"));
        assert!(!html.contains(NO_RESULTS_TEXT));
        assert!(!html.contains(LOAD_ERROR_TEXT));
    }
}
