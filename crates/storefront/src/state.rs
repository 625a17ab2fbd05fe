//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, warn};

use iolo_core::SiteSettings;

use crate::config::StorefrontConfig;
use crate::db::SettingsRepository;

/// How long site settings are served from memory.
const SETTINGS_TTL: Duration = Duration::from_secs(60);

const SETTINGS_KEY: &str = "site_settings";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    settings: Cache<&'static str, SiteSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let settings = Cache::builder()
            .max_capacity(1)
            .time_to_live(SETTINGS_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                settings,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Current site settings.
    ///
    /// Falls back to the built-in defaults when no row exists or the read
    /// fails. Defaults returned because of a failed read are not cached.
    pub async fn site_settings(&self) -> SiteSettings {
        if let Some(settings) = self.inner.settings.get(SETTINGS_KEY).await {
            debug!("Cache hit for site settings");
            return settings;
        }

        match SettingsRepository::new(self.pool()).get().await {
            Ok(stored) => {
                let settings = stored.unwrap_or_default();
                self.inner
                    .settings
                    .insert(SETTINGS_KEY, settings.clone())
                    .await;
                settings
            }
            Err(e) => {
                warn!(error = %e, "Failed to load site settings, using defaults");
                SiteSettings::default()
            }
        }
    }
}
