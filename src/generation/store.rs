use crate::error::{Result, SeedreamError};
use crate::models::GeneratedImage;
use async_trait::async_trait;
use chrono::Utc;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_OUTPUT_SUBDIR: &str = "seedream_images";
const DOWNLOAD_TIMEOUT_SECS: u64 = 120;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpImageFetcher {
    http: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| SeedreamError::ConfigError(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SeedreamError::TransportError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SeedreamError::TransportError(format!(
                "download returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SeedreamError::TransportError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Downloads generated images and writes them under the resolved output
/// directory. Failures here are warnings recorded per image; they never fail
/// the surrounding task.
pub struct ImageStore {
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: Arc::new(HttpImageFetcher::new()?),
        })
    }

    pub fn with_fetcher(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { fetcher }
    }

    /// None: caller wants URLs only. Empty string: default temp subdirectory.
    pub fn resolve_output_dir(output_directory: Option<&str>) -> Option<PathBuf> {
        match output_directory {
            None => None,
            Some(dir) if dir.trim().is_empty() => {
                Some(env::temp_dir().join(DEFAULT_OUTPUT_SUBDIR))
            }
            Some(dir) => Some(PathBuf::from(dir)),
        }
    }

    pub async fn save_all(&self, dir: &Path, images: &mut [GeneratedImage], base: Option<&str>) {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            log::warn!(
                "⚠️  Could not create output directory {}: {}",
                dir.display(),
                e
            );
            for image in images.iter_mut() {
                image.save_error = Some(format!("could not create {}: {}", dir.display(), e));
            }
            return;
        }

        let total = images.len();
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        for (index, image) in images.iter_mut().enumerate() {
            let name = file_name(base, index, total, &timestamp);
            let path = dir.join(name);
            match self.save_one(&image.url, &path).await {
                Ok(saved) => {
                    log::info!("💾 Saved image {} to {}", index + 1, saved.display());
                    image.saved_path = Some(saved);
                }
                Err(e) => {
                    log::warn!("⚠️  Failed to save image {}: {}", index + 1, e);
                    image.save_error = Some(e.to_string());
                }
            }
        }
    }

    async fn save_one(&self, url: &str, path: &Path) -> Result<PathBuf> {
        let bytes = self.fetcher.fetch(url).await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| SeedreamError::TransportError(e.to_string()))?;
        Ok(path.to_path_buf())
    }
}

/// `<stem>_<index>.<ext>` for multiple images sharing a custom base,
/// `<stem>.<ext>` for a single one, `seedream_<timestamp>_<n>.png` otherwise.
fn file_name(base: Option<&str>, index: usize, total: usize, timestamp: &str) -> String {
    match base {
        Some(base) => {
            let (stem, ext) = split_filename(base);
            if total > 1 {
                format!("{}_{}.{}", stem, index, ext)
            } else {
                format!("{}.{}", stem, ext)
            }
        }
        None => format!("seedream_{}_{}.png", timestamp, index + 1),
    }
}

fn split_filename(base: &str) -> (&str, &str) {
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
        _ => (base, "png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapFetcher {
        responses: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl ImageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| SeedreamError::TransportError("download returned 404".to_string()))
        }
    }

    fn store_with(responses: &[(&str, &[u8])]) -> ImageStore {
        let responses = responses
            .iter()
            .map(|(url, bytes)| (url.to_string(), bytes.to_vec()))
            .collect();
        ImageStore::with_fetcher(Arc::new(MapFetcher { responses }))
    }

    #[test]
    fn test_resolve_output_dir() {
        assert!(ImageStore::resolve_output_dir(None).is_none());
        assert_eq!(
            ImageStore::resolve_output_dir(Some("")),
            Some(env::temp_dir().join(DEFAULT_OUTPUT_SUBDIR))
        );
        assert_eq!(
            ImageStore::resolve_output_dir(Some("/data/out")),
            Some(PathBuf::from("/data/out"))
        );
    }

    #[test]
    fn test_file_name_patterns() {
        // Default: timestamped, 1-based counter.
        assert_eq!(file_name(None, 0, 3, "20260806_120000"), "seedream_20260806_120000_1.png");
        assert_eq!(file_name(None, 2, 3, "20260806_120000"), "seedream_20260806_120000_3.png");
        // Custom base, single image: extension defaults to png.
        assert_eq!(file_name(Some("sunset"), 0, 1, "t"), "sunset.png");
        assert_eq!(file_name(Some("sunset.jpg"), 0, 1, "t"), "sunset.jpg");
        // Custom base, multiple images: 0-based index before the extension.
        assert_eq!(file_name(Some("sunset"), 0, 2, "t"), "sunset_0.png");
        assert_eq!(file_name(Some("sunset.jpg"), 1, 2, "t"), "sunset_1.jpg");
    }

    #[tokio::test]
    async fn test_save_all_records_per_image_failures() {
        let store = store_with(&[("https://ark.example.com/a.png", b"first")]);
        let dir = tempfile::tempdir().unwrap();
        let mut images = vec![
            GeneratedImage::new("https://ark.example.com/a.png", None),
            GeneratedImage::new("https://ark.example.com/missing.png", None),
        ];

        store.save_all(dir.path(), &mut images, Some("out")).await;

        let saved = images[0].saved_path.clone().unwrap();
        assert_eq!(saved, dir.path().join("out_0.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"first");
        assert!(images[0].save_error.is_none());

        // Second image fell back to URL-only with the failure recorded.
        assert!(images[1].saved_path.is_none());
        assert!(images[1].save_error.as_deref().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_unwritable_directory_marks_all_images() {
        let store = store_with(&[("u", b"data")]);
        let file = tempfile::NamedTempFile::new().unwrap();
        // A plain file cannot be used as a directory.
        let mut images = vec![GeneratedImage::new("u", None)];
        store.save_all(file.path(), &mut images, None).await;
        assert!(images[0].saved_path.is_none());
        assert!(images[0].save_error.is_some());
    }
}
