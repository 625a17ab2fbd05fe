//! Category and text filtering for the public menu.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::item::FoodItem;
use crate::types::Category;

/// Label of the catch-all tab.
pub const ALL_LABEL: &str = "Tümü";

/// Query-string value of the catch-all tab.
pub const ALL_VALUE: &str = "All";

/// Selected menu tab.
///
/// Parsed from the `category` query parameter. Anything that is not a known
/// category (including an empty or missing value) selects [`CategoryFilter::All`],
/// so stale or hand-edited links still show the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Lenient parse used for query parameters.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<Category>().ok())
            .map_or(Self::All, Self::Only)
    }

    /// Value to put back into the `category` query parameter.
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::All => ALL_VALUE,
            Self::Only(category) => category.as_str(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(category) => category.label(),
        }
    }

    #[must_use]
    pub fn matches(self, item: &FoodItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.query_value())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_query(raw.as_deref()))
    }
}

/// Free-text search over item names and ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The text as typed, for echoing back into the search box.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Only the empty query matches everything; whitespace is matched literally.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn matches(&self, item: &FoodItem) -> bool {
        if self.is_blank() {
            return true;
        }
        item.name.to_lowercase().contains(&self.needle)
            || item
                .ingredients
                .iter()
                .any(|i| i.to_lowercase().contains(&self.needle))
    }
}

/// Combined menu filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuFilter {
    pub category: CategoryFilter,
    pub search: SearchQuery,
}

impl MenuFilter {
    #[must_use]
    pub const fn new(category: CategoryFilter, search: SearchQuery) -> Self {
        Self { category, search }
    }

    /// Items passing both the category and the search test, in input order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [FoodItem]) -> Vec<&'a FoodItem> {
        items
            .iter()
            .filter(|item| self.category.matches(item) && self.search.matches(item))
            .collect()
    }
}

/// Restrict a fetched list to items shown publicly.
#[must_use]
pub fn available(items: Vec<FoodItem>) -> Vec<FoodItem> {
    items.into_iter().filter(|item| item.is_available).collect()
}

/// Tabs for the menu page: All first, then each category present in
/// `items` in order of first appearance.
#[must_use]
pub fn category_tabs(items: &[FoodItem]) -> Vec<CategoryFilter> {
    let mut tabs = vec![CategoryFilter::All];
    for item in items {
        let tab = CategoryFilter::Only(item.category);
        if !tabs.contains(&tab) {
            tabs.push(tab);
        }
    }
    tabs
}
