//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use iolo_core::{AdminRole, AdminUserId, Email};

/// An admin account as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The admin behind a verified bearer token.
///
/// Built from token claims only, so it reflects the account as it was when
/// the token was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub role: AdminRole,
}

impl CurrentAdmin {
    /// Whether this admin may create, update or delete content.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        self.role.can_edit()
    }
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}
