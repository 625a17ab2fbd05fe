//! Editable site text for the about and contact pages.
//!
//! Settings are a single row keyed [`SETTINGS_ID`]. Readers that find no row
//! (or cannot read it) use [`SiteSettings::default`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key of the settings row.
pub const SETTINGS_ID: &str = "about";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub id: String,
    pub about_title: String,
    pub about_subtitle: String,
    pub about_description: String,
    pub feature1_title: String,
    pub feature1_desc: String,
    pub feature2_title: String,
    pub feature2_desc: String,
    pub feature3_title: String,
    pub feature3_desc: String,
    pub about_image1: Option<String>,
    pub about_image2: Option<String>,
    pub contact_address: String,
    pub contact_phone: String,
    pub contact_phone_hours: String,
    pub contact_email: String,
    pub contact_instagram: Option<String>,
    pub contact_twitter: Option<String>,
    pub contact_facebook: Option<String>,
    pub contact_map_url: Option<String>,
    /// Unset for the built-in defaults.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.to_owned(),
            about_title: "Hikayemiz".to_owned(),
            about_subtitle: "Erhan Usta'nın Lezzet Yolculuğu".to_owned(),
            about_description: "2010 yılında İzmir Göztepe'de küçük bir dükkanda başlayan \
                serüvenimiz, Erhan Usta'nın tutkusuyla bugün şehrin en sevilen pizza durağı \
                haline geldi. Sırrımız çok basit: Geleneksel yöntemlere sadık kalmak ve asla \
                kaliteden ödün vermemek."
                .to_owned(),
            feature1_title: "Taş Fırın Lezzeti".to_owned(),
            feature1_desc: "Pizzalarımız, meşe odunuyla ısıtılan özel taş fırınımızda, \
                400 derecede pişer."
                .to_owned(),
            feature2_title: "72 Saat Mayalanma".to_owned(),
            feature2_desc: "Hamurumuz özel un karışımıyla hazırlanır ve sindirimi \
                kolaylaştırmak için en az 72 saat soğuk mayalanır."
                .to_owned(),
            feature3_title: "%100 Yerli ve Doğal".to_owned(),
            feature3_desc: "Soslarımızda Çanakkale domatesleri, üzerlerinde ise yerel \
                üreticilerden aldığımız taze peynirler kullanılır."
                .to_owned(),
            about_image1: None,
            about_image2: None,
            contact_address: "Mithatpaşa Caddesi No: 35, Göztepe, Konak / İzmir".to_owned(),
            contact_phone: "+90 232 555 35 35".to_owned(),
            contact_phone_hours: "Hergün 11:00 - 23:00 arası".to_owned(),
            contact_email: "info@iolopizza.com".to_owned(),
            contact_instagram: None,
            contact_twitter: None,
            contact_facebook: None,
            contact_map_url: None,
            updated_at: None,
        }
    }
}

/// A titled feature block on the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// A social profile link on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink<'a> {
    pub network: &'static str,
    pub url: &'a str,
}

impl SiteSettings {
    #[must_use]
    pub fn features(&self) -> [Feature<'_>; 3] {
        [
            Feature {
                title: &self.feature1_title,
                description: &self.feature1_desc,
            },
            Feature {
                title: &self.feature2_title,
                description: &self.feature2_desc,
            },
            Feature {
                title: &self.feature3_title,
                description: &self.feature3_desc,
            },
        ]
    }

    /// Configured about-page images, in order.
    #[must_use]
    pub fn about_images(&self) -> Vec<&str> {
        [&self.about_image1, &self.about_image2]
            .into_iter()
            .filter_map(|image| image.as_deref())
            .collect()
    }

    /// Non-empty social profile links.
    #[must_use]
    pub fn social_links(&self) -> Vec<SocialLink<'_>> {
        [
            ("Instagram", &self.contact_instagram),
            ("Twitter", &self.contact_twitter),
            ("Facebook", &self.contact_facebook),
        ]
        .into_iter()
        .filter_map(|(network, url)| {
            url.as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|url| SocialLink { network, url })
        })
        .collect()
    }

    #[must_use]
    pub fn has_social_links(&self) -> bool {
        !self.social_links().is_empty()
    }

    /// `tel:` target with spaces removed.
    #[must_use]
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .contact_phone
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("tel:{digits}")
    }

    /// Apply an admin update. Absent fields are left unchanged; an empty
    /// string clears an optional field.
    #[must_use]
    pub fn merged(mut self, update: SettingsUpdate) -> Self {
        fn text(target: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *target = v;
            }
        }
        fn optional(target: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value {
                let trimmed = v.trim();
                *target = (!trimmed.is_empty()).then(|| trimmed.to_owned());
            }
        }

        text(&mut self.about_title, update.about_title);
        text(&mut self.about_subtitle, update.about_subtitle);
        text(&mut self.about_description, update.about_description);
        text(&mut self.feature1_title, update.feature1_title);
        text(&mut self.feature1_desc, update.feature1_desc);
        text(&mut self.feature2_title, update.feature2_title);
        text(&mut self.feature2_desc, update.feature2_desc);
        text(&mut self.feature3_title, update.feature3_title);
        text(&mut self.feature3_desc, update.feature3_desc);
        optional(&mut self.about_image1, update.about_image1);
        optional(&mut self.about_image2, update.about_image2);
        text(&mut self.contact_address, update.contact_address);
        text(&mut self.contact_phone, update.contact_phone);
        text(&mut self.contact_phone_hours, update.contact_phone_hours);
        text(&mut self.contact_email, update.contact_email);
        optional(&mut self.contact_instagram, update.contact_instagram);
        optional(&mut self.contact_twitter, update.contact_twitter);
        optional(&mut self.contact_facebook, update.contact_facebook);
        optional(&mut self.contact_map_url, update.contact_map_url);
        self.id = SETTINGS_ID.to_owned();
        self
    }
}

/// Admin payload for `PUT /api/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub about_title: Option<String>,
    pub about_subtitle: Option<String>,
    pub about_description: Option<String>,
    pub feature1_title: Option<String>,
    pub feature1_desc: Option<String>,
    pub feature2_title: Option<String>,
    pub feature2_desc: Option<String>,
    pub feature3_title: Option<String>,
    pub feature3_desc: Option<String>,
    pub about_image1: Option<String>,
    pub about_image2: Option<String>,
    pub contact_address: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_phone_hours: Option<String>,
    pub contact_email: Option<String>,
    pub contact_instagram: Option<String>,
    pub contact_twitter: Option<String>,
    pub contact_facebook: Option<String>,
    pub contact_map_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_social_links() {
        let settings = SiteSettings::default();
        assert_eq!(settings.id, "about");
        assert!(!settings.has_social_links());
        assert!(settings.about_images().is_empty());
        assert_eq!(settings.features()[1].title, "72 Saat Mayalanma");
    }

    #[test]
    fn test_phone_href() {
        assert_eq!(SiteSettings::default().phone_href(), "tel:+902325553535");
    }

    #[test]
    fn test_merge_keeps_absent_and_clears_blank() {
        let base = SiteSettings {
            contact_instagram: Some("https://instagram.com/iolopizza".to_owned()),
            ..SiteSettings::default()
        };
        let update: SettingsUpdate = serde_json::from_str(
            r#"{"aboutTitle":"Biz Kimiz","contactInstagram":"","contactTwitter":"https://x.com/iolo"}"#,
        )
        .unwrap();
        let merged = base.merged(update);
        assert_eq!(merged.about_title, "Biz Kimiz");
        assert_eq!(merged.about_subtitle, SiteSettings::default().about_subtitle);
        assert_eq!(merged.contact_instagram, None);
        assert_eq!(
            merged.social_links(),
            vec![SocialLink {
                network: "Twitter",
                url: "https://x.com/iolo"
            }]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(SiteSettings::default()).unwrap();
        assert_eq!(json["contactPhoneHours"], "Hergün 11:00 - 23:00 arası");
        assert!(json["contactMapUrl"].is_null());
        assert!(json.get("updatedAt").is_none());
    }
}
