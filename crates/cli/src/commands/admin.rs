//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! ADMIN_PASSWORD='...' iolo-cli admin create -e erhan@iolopizza.com -n "Erhan" -r admin
//!
//! # Reset a password
//! iolo-cli admin set-password -e erhan@iolopizza.com --password '...'
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_PASSWORD` - Password, when `--password` is not given

use iolo_admin::models::AdminUser;
use iolo_admin::services::{AuthError, AuthService};
use iolo_core::AdminRole;
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, viewer")]
    InvalidRole(String),

    /// Account could not be created or updated.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No account has this email.
    #[error("No admin user with email: {0}")]
    UnknownUser(String),
}

fn parse_role(role: &str) -> Result<AdminRole, AdminError> {
    role.parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))
}

/// Create a new admin user.
///
/// # Errors
///
/// Returns `AdminError` if the role is unknown, the email is malformed or
/// taken, the password is too weak, or the database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<AdminUser, AdminError> {
    let role = parse_role(role)?;
    let pool = connect().await?;

    tracing::info!("Creating admin user: {} ({})", email, role);
    let user = AuthService::new(&pool)
        .create_admin(email, name, role, password)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );
    Ok(user)
}

/// Replace the password of an existing admin user.
///
/// # Errors
///
/// Returns `AdminError::UnknownUser` if no account has this email.
pub async fn set_password(email: &str, password: &str) -> Result<(), AdminError> {
    let pool = connect().await?;

    AuthService::new(&pool)
        .reset_password(email, password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => AdminError::UnknownUser(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!("Password updated for {}", email);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), AdminRole::Admin);
        assert_eq!(parse_role("viewer").unwrap(), AdminRole::Viewer);
        assert!(matches!(
            parse_role("super_admin"),
            Err(AdminError::InvalidRole(r)) if r == "super_admin"
        ));
    }
}
