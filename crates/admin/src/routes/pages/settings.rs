//! About and contact page editor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::Redirect,
};
use tracing::instrument;

use iolo_core::SiteSettings;
use iolo_core::settings::SettingsUpdate;

use crate::db::SettingsRepository;
use crate::error::PageResult;
use crate::middleware::PageSession;
use crate::state::AppState;

use super::form::FormData;
use super::{LayoutView, Notice, require_editor};

#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub layout: LayoutView,
    pub settings: SiteSettings,
    pub can_edit: bool,
    pub success_message: Option<&'static str>,
}

/// Settings described by a submitted form.
///
/// Text inputs map one-to-one onto the settings fields. A file chosen for an
/// about image replaces the URL typed next to it.
fn settings_update(form: &FormData) -> SettingsUpdate {
    let text = |name: &str| form.text(name).map(str::to_owned);
    let image = |name: &str| {
        form.uploaded(&format!("{name}_file"))
            .into_iter()
            .next()
            .or_else(|| text(name))
    };

    SettingsUpdate {
        about_title: text("about_title"),
        about_subtitle: text("about_subtitle"),
        about_description: text("about_description"),
        feature1_title: text("feature1_title"),
        feature1_desc: text("feature1_desc"),
        feature2_title: text("feature2_title"),
        feature2_desc: text("feature2_desc"),
        feature3_title: text("feature3_title"),
        feature3_desc: text("feature3_desc"),
        about_image1: image("about_image1"),
        about_image2: image("about_image2"),
        contact_address: text("contact_address"),
        contact_phone: text("contact_phone"),
        contact_phone_hours: text("contact_phone_hours"),
        contact_email: text("contact_email"),
        contact_instagram: text("contact_instagram"),
        contact_twitter: text("contact_twitter"),
        contact_facebook: text("contact_facebook"),
        contact_map_url: text("contact_map_url"),
    }
}

/// `GET /admin/settings`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    Query(notice): Query<Notice>,
) -> PageResult<SettingsTemplate> {
    let settings = SettingsRepository::new(state.pool())
        .get()
        .await?
        .unwrap_or_default();

    Ok(SettingsTemplate {
        layout: LayoutView::new(&admin, "/admin/settings"),
        settings,
        can_edit: admin.can_edit(),
        success_message: notice.message(),
    })
}

/// `POST /admin/settings`
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    PageSession(admin): PageSession,
    mut multipart: Multipart,
) -> PageResult<Redirect> {
    require_editor(&admin)?;
    let form = FormData::read(&mut multipart, state.uploads()).await?;

    let repo = SettingsRepository::new(state.pool());
    let current = repo.get().await?.unwrap_or_default();
    repo.upsert(&current.merged(settings_update(&form))).await?;

    tracing::info!("Site settings updated from page");
    Ok(Redirect::to("/admin/settings?success=saved"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use iolo_core::{AdminRole, AdminUserId, Email};

    use super::*;
    use crate::models::CurrentAdmin;

    #[test]
    fn test_form_merges_onto_settings() {
        let form = FormData::default()
            .with_field("about_title", "Biz Kimiz")
            .with_field("about_image1", "https://cdn.iolopizza.com/firin.jpg")
            .with_field("about_image2", "https://cdn.iolopizza.com/eski.jpg")
            .with_upload("about_image2_file", "http://localhost:3000/uploads/yeni.jpg")
            .with_field("contact_instagram", "");
        let base = SiteSettings {
            contact_instagram: Some("https://instagram.com/iolopizza".to_string()),
            ..SiteSettings::default()
        };

        let merged = base.merged(settings_update(&form));
        assert_eq!(merged.about_title, "Biz Kimiz");
        assert_eq!(
            merged.about_image1.as_deref(),
            Some("https://cdn.iolopizza.com/firin.jpg")
        );
        assert_eq!(
            merged.about_image2.as_deref(),
            Some("http://localhost:3000/uploads/yeni.jpg")
        );
        assert_eq!(merged.contact_instagram, None);
        // Not in the form
        assert_eq!(merged.contact_phone, SiteSettings::default().contact_phone);
    }

    #[test]
    fn test_page_shows_stored_values() {
        let admin = CurrentAdmin {
            id: AdminUserId::generate(),
            email: Email::parse("erhan@iolopizza.com").unwrap(),
            role: AdminRole::Viewer,
        };
        let html = SettingsTemplate {
            layout: LayoutView::new(&admin, "/admin/settings"),
            settings: SiteSettings::default(),
            can_edit: false,
            success_message: Some("Değişiklikler kaydedildi."),
        }
        .render()
        .unwrap();
        assert!(html.contains("72 Saat Mayalanma"));
        assert!(html.contains("+90 232 555 35 35"));
        assert!(html.contains("Değişiklikler kaydedildi."));
        assert!(!html.contains(r#"type="submit""#));
    }
}
