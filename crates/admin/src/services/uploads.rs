//! Image upload storage.
//!
//! Files land in the upload directory shared with the storefront, which
//! serves them under `/uploads`. Names are `<unix-millis>-<random>.<ext>`
//! so they never collide with or reveal the client's file name.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::instrument;

/// Largest accepted file, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field names that carry images.
pub const IMAGE_FIELDS: [&str; 2] = ["images", "image"];

/// Errors that can occur while accepting an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file exceeds {max} bytes")]
    TooLarge { max: usize },

    #[error("invalid multipart body: {0}")]
    Multipart(String),

    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether a part's declared content type is an image.
#[must_use]
pub fn is_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
}

/// Pick a file extension from the client file name, else from the content type.
#[must_use]
pub fn extension_for(original_name: Option<&str>, content_type: &str) -> String {
    let from_name = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| is_simple_extension(ext));

    if let Some(ext) = from_name {
        return ext;
    }

    let subtype = content_type
        .split(';')
        .next()
        .and_then(|ct| ct.trim().split_once('/'))
        .map(|(_, sub)| sub.to_ascii_lowercase())
        .unwrap_or_default();

    match subtype.as_str() {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        sub if is_simple_extension(sub) => sub.to_string(),
        _ => "bin".to_string(),
    }
}

fn is_simple_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Stored file name for an upload received at `now`.
#[must_use]
pub fn stored_file_name(now: DateTime<Utc>, random: u32, extension: &str) -> String {
    format!("{}-{random}.{extension}", now.timestamp_millis())
}

/// Writes uploaded images and builds their public URLs.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_base_url: String,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Public URL of a stored file.
    #[must_use]
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/uploads/{file_name}", self.public_base_url)
    }

    /// Write one image and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::TooLarge` above [`MAX_UPLOAD_BYTES`] and
    /// `UploadError::Io` if the file cannot be written.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn store(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                max: MAX_UPLOAD_BYTES,
            });
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let random = rand::rng().random_range(0..1_000_000_000);
        let file_name = stored_file_name(
            Utc::now(),
            random,
            &extension_for(original_name, content_type),
        );
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::info!(file = %file_name, "Stored upload");
        Ok(self.url_for(&file_name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_is_image() {
        assert!(is_image(Some("image/png")));
        assert!(is_image(Some("IMAGE/JPEG")));
        assert!(!is_image(Some("application/pdf")));
        assert!(!is_image(None));
    }

    #[test]
    fn test_extension_prefers_file_name() {
        assert_eq!(extension_for(Some("margarita.JPG"), "image/jpeg"), "jpg");
        assert_eq!(extension_for(Some("kunefe.webp"), "image/png"), "webp");
    }

    #[test]
    fn test_extension_falls_back_to_content_type() {
        assert_eq!(extension_for(None, "image/jpeg"), "jpg");
        assert_eq!(extension_for(Some("blob"), "image/png"), "png");
        assert_eq!(extension_for(Some("logo"), "image/svg+xml"), "svg");
        assert_eq!(extension_for(Some("x.tar.gz/../"), "weird"), "bin");
    }

    #[test]
    fn test_stored_file_name() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(
            stored_file_name(now, 42, "png"),
            "1760000000123-42.png"
        );
    }

    #[test]
    fn test_url_for() {
        let store = UploadStore::new("uploads", "https://iolopizza.com");
        assert_eq!(
            store.url_for("1-2.png"),
            "https://iolopizza.com/uploads/1-2.png"
        );
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("nested"), "http://localhost:3000");

        let url = store
            .store(Some("pizza.png"), "image/png", b"\x89PNG")
            .await
            .unwrap();

        let file_name = url.rsplit('/').next().unwrap();
        assert!(url.starts_with("http://localhost:3000/uploads/"));
        assert!(file_name.ends_with(".png"));
        let written = std::fs::read(dir.path().join("nested").join(file_name)).unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn test_store_rejects_large_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), "http://localhost:3000");
        let big = vec![0_u8; MAX_UPLOAD_BYTES + 1];

        assert!(matches!(
            store.store(None, "image/png", &big).await,
            Err(UploadError::TooLarge { .. })
        ));
    }
}
