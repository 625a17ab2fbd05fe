//! Site settings storage.
//!
//! A single row keyed by [`SETTINGS_ID`]; absent until the first save.

use sqlx::PgPool;
use tracing::instrument;

use iolo_core::SiteSettings;
use iolo_core::settings::SETTINGS_ID;

use super::RepositoryError;

const SETTINGS_COLUMNS: &str = "id, about_title, about_subtitle, about_description, \
     feature1_title, feature1_desc, feature2_title, feature2_desc, \
     feature3_title, feature3_desc, about_image1, about_image2, \
     contact_address, contact_phone, contact_phone_hours, contact_email, \
     contact_instagram, contact_twitter, contact_facebook, contact_map_url, \
     updated_at";

pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Option<SiteSettings>, RepositoryError> {
        let row = sqlx::query_as::<_, SiteSettings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM menu.site_settings WHERE id = $1"
        ))
        .bind(SETTINGS_ID)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Insert or overwrite the settings row. The `id` field of `settings` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    #[instrument(skip(self, settings))]
    pub async fn upsert(&self, settings: &SiteSettings) -> Result<SiteSettings, RepositoryError> {
        let row = sqlx::query_as::<_, SiteSettings>(&format!(
            "INSERT INTO menu.site_settings ({SETTINGS_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, NOW()) \
             ON CONFLICT (id) DO UPDATE SET \
                 about_title = EXCLUDED.about_title, \
                 about_subtitle = EXCLUDED.about_subtitle, \
                 about_description = EXCLUDED.about_description, \
                 feature1_title = EXCLUDED.feature1_title, \
                 feature1_desc = EXCLUDED.feature1_desc, \
                 feature2_title = EXCLUDED.feature2_title, \
                 feature2_desc = EXCLUDED.feature2_desc, \
                 feature3_title = EXCLUDED.feature3_title, \
                 feature3_desc = EXCLUDED.feature3_desc, \
                 about_image1 = EXCLUDED.about_image1, \
                 about_image2 = EXCLUDED.about_image2, \
                 contact_address = EXCLUDED.contact_address, \
                 contact_phone = EXCLUDED.contact_phone, \
                 contact_phone_hours = EXCLUDED.contact_phone_hours, \
                 contact_email = EXCLUDED.contact_email, \
                 contact_instagram = EXCLUDED.contact_instagram, \
                 contact_twitter = EXCLUDED.contact_twitter, \
                 contact_facebook = EXCLUDED.contact_facebook, \
                 contact_map_url = EXCLUDED.contact_map_url, \
                 updated_at = NOW() \
             RETURNING {SETTINGS_COLUMNS}"
        ))
        .bind(SETTINGS_ID)
        .bind(&settings.about_title)
        .bind(&settings.about_subtitle)
        .bind(&settings.about_description)
        .bind(&settings.feature1_title)
        .bind(&settings.feature1_desc)
        .bind(&settings.feature2_title)
        .bind(&settings.feature2_desc)
        .bind(&settings.feature3_title)
        .bind(&settings.feature3_desc)
        .bind(&settings.about_image1)
        .bind(&settings.about_image2)
        .bind(&settings.contact_address)
        .bind(&settings.contact_phone)
        .bind(&settings.contact_phone_hours)
        .bind(&settings.contact_email)
        .bind(&settings.contact_instagram)
        .bind(&settings.contact_twitter)
        .bind(&settings.contact_facebook)
        .bind(&settings.contact_map_url)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }
}
