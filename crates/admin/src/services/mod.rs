//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Password login and bearer tokens
//! - `uploads` - Image uploads written to the shared upload directory

pub mod auth;
pub mod uploads;

pub use auth::{AuthError, AuthService, TokenError, TokenSigner};
pub use uploads::{UploadError, UploadStore};
