//! Domain models for admin.

pub mod admin_user;

pub use admin_user::{AdminUser, CurrentAdmin};
