//! Dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use iolo_core::{Category, FoodItem};

use crate::db::FoodRepository;
use crate::error::PageResult;
use crate::middleware::PageSession;
use crate::state::AppState;

use super::LayoutView;

/// Item count for one menu category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: &'static str,
    pub count: usize,
}

/// Menu totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSummary {
    pub total: usize,
    pub available: usize,
    pub hidden: usize,
    pub by_category: Vec<CategoryCount>,
}

impl MenuSummary {
    #[must_use]
    pub fn of(items: &[FoodItem]) -> Self {
        let available = items.iter().filter(|item| item.is_available).count();
        let by_category = Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                label: category.label(),
                count: items.iter().filter(|item| item.category == category).count(),
            })
            .collect();

        Self {
            total: items.len(),
            available,
            hidden: items.len() - available,
            by_category,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: LayoutView,
    pub summary: MenuSummary,
}

/// `GET /admin`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
) -> PageResult<DashboardTemplate> {
    let items = FoodRepository::new(state.pool()).list_all().await?;

    Ok(DashboardTemplate {
        layout: LayoutView::new(&admin, "/admin"),
        summary: MenuSummary::of(&items),
    })
}
