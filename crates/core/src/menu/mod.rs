//! Menu domain: items, filtering, dietary tags, carousels and page state.

pub mod carousel;
pub mod classify;
pub mod filter;
pub mod item;
pub mod page;

pub use carousel::{CardCarousels, Carousel, PLACEHOLDER_IMAGE, Step};
pub use classify::DietaryTags;
pub use filter::{
    ALL_LABEL, ALL_VALUE, CategoryFilter, MenuFilter, SearchQuery, available, category_tabs,
};
pub use item::{FoodDraft, FoodInput, FoodItem, FoodValidationError};
pub use page::{LoadTicket, MenuDisplay, MenuPage, Resolution};
