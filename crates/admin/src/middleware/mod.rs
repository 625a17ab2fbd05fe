//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span with `request_id` field)
//! 3. Request ID (record on span, tag in Sentry, echo header)
//! 4. Security headers (`nosniff`, `DENY`, `no-store`)
//! 5. Login rate limiter (only on `POST /api/auth/login` and `POST /admin/login`)
//!
//! Authentication is not a layer: API handlers take an [`AdminSession`] or
//! [`EditorSession`] argument, HTML pages a [`PageSession`].

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use auth::{AdminSession, EditorSession, PageSession};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
