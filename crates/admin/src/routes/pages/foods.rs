//! Menu item pages: list, create, edit and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use iolo_core::menu::{FoodInput, FoodValidationError};
use iolo_core::{Category, FoodId, FoodItem};

use crate::db::FoodRepository;
use crate::error::PageResult;
use crate::middleware::PageSession;
use crate::models::CurrentAdmin;
use crate::routes::foods::{not_found_as_food, parse_id};
use crate::state::AppState;

use super::form::FormData;
use super::{LayoutView, Notice, require_editor};

// =============================================================================
// Views
// =============================================================================

/// One row of the item table.
#[derive(Debug, Clone)]
pub struct FoodRowView {
    pub id: String,
    pub name: String,
    pub category_label: &'static str,
    pub price: String,
    pub thumbnail: Option<String>,
    pub is_available: bool,
}

impl From<&FoodItem> for FoodRowView {
    fn from(item: &FoodItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category_label: item.category.label(),
            price: item.price.display(),
            thumbnail: item.images.first().cloned(),
            is_available: item.is_available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Field values of the item form, as typed.
#[derive(Debug, Clone)]
pub struct FoodFormView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    /// One ingredient per line.
    pub ingredients: String,
    pub images: Vec<String>,
    pub is_available: bool,
}

impl FoodFormView {
    fn blank() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: Category::Pizza.as_str().to_string(),
            ingredients: String::new(),
            images: Vec::new(),
            is_available: true,
        }
    }

    fn categories(&self) -> Vec<CategoryOption> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryOption {
                value: category.as_str(),
                label: category.label(),
                selected: category.as_str() == self.category,
            })
            .collect()
    }
}

impl From<&FoodItem> for FoodFormView {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.amount().to_string(),
            category: item.category.as_str().to_string(),
            ingredients: item.ingredients.join("\n"),
            images: item.images.clone(),
            is_available: item.is_available,
        }
    }
}

/// The item payload a submitted form describes.
///
/// Every field is present: an unticked availability box means hidden, and
/// the images are the kept ones followed by the new uploads.
fn food_input(form: &FormData) -> FoodInput {
    let mut images = form.all("keep_image");
    images.extend(form.uploaded("images"));

    FoodInput {
        name: Some(form.text("name").unwrap_or_default().to_string()),
        description: Some(form.text("description").unwrap_or_default().to_string()),
        price: Some(serde_json::Value::String(
            form.text("price").unwrap_or_default().to_string(),
        )),
        category: Some(form.text("category").unwrap_or_default().to_string()),
        ingredients: Some(
            form.text("ingredients")
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect(),
        ),
        images: Some(images),
        is_available: Some(form.checked("is_available")),
    }
}

/// Redisplay values for a rejected form, so nothing typed or uploaded is lost.
fn form_view(input: &FoodInput) -> FoodFormView {
    let price = match &input.price {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    FoodFormView {
        name: input.name.clone().unwrap_or_default(),
        description: input.description.clone().unwrap_or_default(),
        price,
        category: input.category.clone().unwrap_or_default(),
        ingredients: input.ingredients.clone().unwrap_or_default().join("\n"),
        images: input.images.clone().unwrap_or_default(),
        is_available: input.is_available.unwrap_or(true),
    }
}

/// Turkish message for a rejected field.
fn validation_message(err: &FoodValidationError) -> String {
    match err {
        FoodValidationError::MissingName => "Ürün adı zorunludur.".to_string(),
        FoodValidationError::MissingPrice => "Fiyat zorunludur.".to_string(),
        FoodValidationError::Price(e) => format!("Geçersiz fiyat: {e}"),
        FoodValidationError::MissingCategory => "Kategori seçiniz.".to_string(),
        FoodValidationError::UnknownCategory(c) => format!("Bilinmeyen kategori: {c}"),
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "foods/list.html")]
pub struct FoodListTemplate {
    pub layout: LayoutView,
    pub foods: Vec<FoodRowView>,
    pub can_edit: bool,
    pub success_message: Option<&'static str>,
}

#[derive(Template, WebTemplate)]
#[template(path = "foods/form.html")]
pub struct FoodFormTemplate {
    pub layout: LayoutView,
    pub title: &'static str,
    pub action: String,
    pub food: FoodFormView,
    pub categories: Vec<CategoryOption>,
    pub can_edit: bool,
    pub error: Option<String>,
}

impl FoodFormTemplate {
    fn new(admin: &CurrentAdmin, existing: Option<FoodId>, food: FoodFormView) -> Self {
        let (title, action) = match existing {
            Some(id) => ("Ürün Düzenle", format!("/admin/foods/{id}/edit")),
            None => ("Yeni Ürün Ekle", "/admin/foods/new".to_string()),
        };

        Self {
            layout: LayoutView::new(admin, "/admin/foods"),
            title,
            action,
            categories: food.categories(),
            food,
            can_edit: admin.can_edit(),
            error: None,
        }
    }

    fn rejected(mut self, err: &FoodValidationError) -> Self {
        self.error = Some(validation_message(err));
        self
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /admin/foods`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    Query(notice): Query<Notice>,
) -> PageResult<FoodListTemplate> {
    let items = FoodRepository::new(state.pool()).list_all().await?;

    Ok(FoodListTemplate {
        layout: LayoutView::new(&admin, "/admin/foods"),
        foods: items.iter().map(FoodRowView::from).collect(),
        can_edit: admin.can_edit(),
        success_message: notice.message(),
    })
}

/// `GET /admin/foods/new`
pub async fn new_page(PageSession(admin): PageSession) -> FoodFormTemplate {
    FoodFormTemplate::new(&admin, None, FoodFormView::blank())
}

/// `POST /admin/foods/new`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    mut multipart: Multipart,
) -> PageResult<Response> {
    require_editor(&admin)?;
    let form = FormData::read(&mut multipart, state.uploads()).await?;
    let input = food_input(&form);
    let view = form_view(&input);

    let draft = match input.validate() {
        Ok(draft) => draft,
        Err(e) => {
            let page = FoodFormTemplate::new(&admin, None, view).rejected(&e);
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let item = FoodRepository::new(state.pool()).create(&draft).await?;
    tracing::info!(food_id = %item.id, name = %item.name, "Food created from page");
    Ok(Redirect::to("/admin/foods?success=created").into_response())
}

/// `GET /admin/foods/{id}/edit`
#[instrument(skip_all, fields(admin_id = %admin.id, food_id = %id))]
pub async fn edit_page(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
) -> PageResult<FoodFormTemplate> {
    let id = parse_id(&id)?;
    let item = FoodRepository::new(state.pool())
        .get(id)
        .await
        .map_err(not_found_as_food)?;

    Ok(FoodFormTemplate::new(&admin, Some(id), FoodFormView::from(&item)))
}

/// `POST /admin/foods/{id}/edit`
#[instrument(skip_all, fields(admin_id = %admin.id, food_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> PageResult<Response> {
    require_editor(&admin)?;
    let id = parse_id(&id)?;
    let repo = FoodRepository::new(state.pool());
    let current = repo.get(id).await.map_err(not_found_as_food)?;

    let form = FormData::read(&mut multipart, state.uploads()).await?;
    let input = food_input(&form);
    let view = form_view(&input);

    let draft = match input.validate_onto(&current) {
        Ok(draft) => draft,
        Err(e) => {
            let page = FoodFormTemplate::new(&admin, Some(id), view).rejected(&e);
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    repo.replace(id, &draft).await.map_err(not_found_as_food)?;
    tracing::info!(food_id = %id, "Food updated from page");
    Ok(Redirect::to("/admin/foods?success=saved").into_response())
}

/// `POST /admin/foods/{id}/delete`
#[instrument(skip_all, fields(admin_id = %admin.id, food_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    Path(id): Path<String>,
) -> PageResult<Redirect> {
    require_editor(&admin)?;
    let id = parse_id(&id)?;
    FoodRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(not_found_as_food)?;

    tracing::info!(food_id = %id, "Food deleted from page");
    Ok(Redirect::to("/admin/foods?success=deleted"))
}
