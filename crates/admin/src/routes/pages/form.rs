//! `multipart/form-data` bodies posted by the admin pages.

use axum::extract::multipart::Multipart;

use crate::error::AppError;
use crate::routes::uploads::{multipart_error, read_limited};
use crate::services::UploadStore;
use crate::services::uploads::is_image;

/// Text fields of a posted form plus the public URLs of the images it carried.
#[derive(Debug, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
    uploads: Vec<(String, String)>,
}

impl FormData {
    /// Read every part. File parts holding an image are stored right away;
    /// other files, including the empty part of an unused file input, are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upload` for a malformed body, an oversized file or
    /// a failed write.
    pub async fn read(multipart: &mut Multipart, store: &UploadStore) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if field.file_name().is_none() {
                let value = field.text().await.map_err(|e| multipart_error(&e))?;
                form.fields.push((name, value));
                continue;
            }

            let content_type = field.content_type().map(str::to_owned);
            if !is_image(content_type.as_deref()) {
                tracing::debug!(field = %name, content_type = ?content_type, "Skipping non-image file");
                continue;
            }

            let file_name = field.file_name().map(str::to_owned);
            let bytes = read_limited(&mut field).await?;
            if bytes.is_empty() {
                continue;
            }
            let url = store
                .store(
                    file_name.as_deref(),
                    content_type.as_deref().unwrap_or_default(),
                    &bytes,
                )
                .await?;
            form.uploads.push((name, url));
        }

        Ok(form)
    }

    #[cfg(test)]
    pub(crate) fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_owned(), value.to_owned()));
        self
    }

    #[cfg(test)]
    pub(crate) fn with_upload(mut self, name: &str, url: &str) -> Self {
        self.uploads.push((name.to_owned(), url.to_owned()));
        self
    }

    /// First value of a text field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a repeated text field, in form order.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Whether a checkbox was ticked. Browsers omit unticked boxes.
    #[must_use]
    pub fn checked(&self, name: &str) -> bool {
        self.text(name).is_some()
    }

    /// URLs of the images uploaded through a file input.
    #[must_use]
    pub fn uploaded(&self, name: &str) -> Vec<String> {
        self.uploads
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, url)| url.clone())
            .collect()
    }
}
