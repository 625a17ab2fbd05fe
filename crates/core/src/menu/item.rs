//! Food items and the admin input that creates or replaces them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::DietaryTags;
use crate::types::{Category, FoodId, Price, PriceError};

/// A menu item as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: FoodId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category: Category,
    pub ingredients: Vec<String>,
    /// Image URLs; index 0 is the default image.
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Spicy/vegetarian tags derived from the current ingredients.
    #[must_use]
    pub fn tags(&self) -> DietaryTags {
        DietaryTags::from_ingredients(&self.ingredients)
    }

    /// Ingredients joined for card display.
    #[must_use]
    pub fn ingredients_line(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Reasons an admin payload is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodValidationError {
    #[error("name is required")]
    MissingName,
    #[error("price is required")]
    MissingPrice,
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error("category is required")]
    MissingCategory,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Raw create/update payload from the admin API.
///
/// Everything is optional here so that missing fields produce a
/// [`FoodValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInput {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Number or numeric string.
    pub price: Option<serde_json::Value>,
    pub category: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// A validated food ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category: Category,
    pub ingredients: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
}

impl FoodInput {
    /// Validate and normalize the payload.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a `FoodValidationError`.
    pub fn validate(self) -> Result<FoodDraft, FoodValidationError> {
        let name = self
            .name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .ok_or(FoodValidationError::MissingName)?;
        let price = parse_price(self.price.ok_or(FoodValidationError::MissingPrice)?)?;
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or(FoodValidationError::MissingCategory)?;
        let category = category
            .parse::<Category>()
            .map_err(|e| FoodValidationError::UnknownCategory(e.0))?;

        let description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(FoodDraft {
            name,
            description,
            price,
            category,
            ingredients: clean_list(self.ingredients),
            images: clean_list(self.images),
            is_available: self.is_available.unwrap_or(true),
        })
    }

    /// Validate an update of `current`: omitted fields keep their stored
    /// value, an empty `description` clears it.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a `FoodValidationError`.
    pub fn validate_onto(self, current: &FoodItem) -> Result<FoodDraft, FoodValidationError> {
        Self {
            name: self.name.or_else(|| Some(current.name.clone())),
            description: self.description.or_else(|| current.description.clone()),
            price: self
                .price
                .or_else(|| Some(serde_json::Value::String(current.price.amount().to_string()))),
            category: self
                .category
                .or_else(|| Some(current.category.as_str().to_owned())),
            ingredients: self.ingredients.or_else(|| Some(current.ingredients.clone())),
            images: self.images.or_else(|| Some(current.images.clone())),
            is_available: self.is_available.or(Some(current.is_available)),
        }
        .validate()
    }
}

fn parse_price(raw: serde_json::Value) -> Result<Price, PriceError> {
    match raw {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| PriceError::NotANumber(n.to_string()))
            .and_then(Price::from_f64),
        serde_json::Value::String(s) => Price::parse(&s),
        other => Err(PriceError::NotANumber(other.to_string())),
    }
}

fn clean_list(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}
