//! About and contact pages, both driven by site settings.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use iolo_core::SiteSettings;

use crate::state::AppState;

/// Shown on the contact page when no social profile is configured.
pub const NO_SOCIAL_TEXT: &str = "Sosyal medya hesaplarımız yakında burada.";

#[derive(Clone)]
pub struct FeatureView {
    pub title: String,
    pub description: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub site: SiteSettings,
    pub features: Vec<FeatureView>,
    pub images: Vec<String>,
}

#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> AboutTemplate {
    let site = state.site_settings().await;
    let features = site
        .features()
        .iter()
        .map(|f| FeatureView {
            title: f.title.to_string(),
            description: f.description.to_string(),
        })
        .collect();
    let images = site.about_images().into_iter().map(String::from).collect();

    AboutTemplate {
        site,
        features,
        images,
    }
}

#[derive(Clone)]
pub struct SocialLinkView {
    pub network: &'static str,
    pub url: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub site: SiteSettings,
    pub phone_href: String,
    pub social_links: Vec<SocialLinkView>,
    pub no_social_text: &'static str,
}

#[instrument(skip(state))]
pub async fn contact(State(state): State<AppState>) -> ContactTemplate {
    let site = state.site_settings().await;
    let social_links = site
        .social_links()
        .into_iter()
        .map(|link| SocialLinkView {
            network: link.network,
            url: link.url.to_string(),
        })
        .collect();

    ContactTemplate {
        phone_href: site.phone_href(),
        social_links,
        site,
        no_social_text: NO_SOCIAL_TEXT,
    }
}
