//! Site settings query.

use sqlx::PgPool;

use iolo_core::SiteSettings;
use iolo_core::settings::SETTINGS_ID;

use super::RepositoryError;

pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The stored settings row, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<SiteSettings>, RepositoryError> {
        let row = sqlx::query_as::<_, SiteSettings>(
            r"
            SELECT id, about_title, about_subtitle, about_description,
                   feature1_title, feature1_desc, feature2_title, feature2_desc,
                   feature3_title, feature3_desc, about_image1, about_image2,
                   contact_address, contact_phone, contact_phone_hours, contact_email,
                   contact_instagram, contact_twitter, contact_facebook, contact_map_url,
                   updated_at
            FROM menu.site_settings
            WHERE id = $1
            ",
        )
        .bind(SETTINGS_ID)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }
}
