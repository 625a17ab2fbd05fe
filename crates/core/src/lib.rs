//! İolo Core - Shared domain library.
//!
//! This crate provides the types and pure logic shared by every component:
//! - `storefront` - Public restaurant site and read-only menu API
//! - `admin` - Menu and site-text management API
//! - `cli` - Migrations, admin user creation and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Menu filtering, dietary tagging and the carousel/page state
//! machines live here so they can be tested without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, categories and roles
//! - [`menu`] - Food items, the menu filter engine, carousel and page state
//! - [`settings`] - Editable site text (about and contact pages)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod menu;
pub mod settings;
pub mod types;

pub use menu::{FoodItem, MenuFilter};
pub use settings::SiteSettings;
pub use types::*;
