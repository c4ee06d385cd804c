use crate::error::{Result, SeedreamError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

pub struct LocalImageSource;

#[async_trait]
impl ImageSource for LocalImageSource {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Normalizes reference inputs into what the Ark API accepts: http(s) URLs
/// pass through, local paths become base64 data URLs.
pub struct ReferenceImageProcessor {
    source: Arc<dyn ImageSource>,
}

impl ReferenceImageProcessor {
    pub fn new() -> Self {
        Self {
            source: Arc::new(LocalImageSource),
        }
    }

    pub fn with_source(source: Arc<dyn ImageSource>) -> Self {
        Self { source }
    }

    /// Maps each input in order; the first unreadable path aborts the whole
    /// task rather than producing a partial list.
    pub async fn process(&self, references: &[String]) -> Result<Vec<String>> {
        let mut resolved = Vec::with_capacity(references.len());
        for reference in references {
            if reference.starts_with("http://") || reference.starts_with("https://") {
                resolved.push(reference.clone());
                continue;
            }

            let path = Path::new(reference);
            let bytes = self.source.read(path).await.map_err(|e| {
                SeedreamError::ReferenceImageError {
                    path: reference.clone(),
                    reason: e.to_string(),
                }
            })?;
            resolved.push(format!(
                "data:{};base64,{}",
                mime_for_path(path),
                BASE64.encode(bytes)
            ));
        }
        Ok(resolved)
    }
}

impl Default for ReferenceImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource {
        files: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl ImageSource for MapSource {
        async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .get(path.to_str().unwrap_or_default())
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn processor_with(files: &[(&str, &[u8])]) -> ReferenceImageProcessor {
        let files = files
            .iter()
            .map(|(path, bytes)| (path.to_string(), bytes.to_vec()))
            .collect();
        ReferenceImageProcessor::with_source(Arc::new(MapSource { files }))
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.gif")), "image/gif");
        assert_eq!(mime_for_path(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("a.bmp")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("noext")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_urls_pass_through_unchanged() {
        let processor = processor_with(&[]);
        let refs = vec![
            "https://example.com/ref.png".to_string(),
            "http://example.com/other.jpg".to_string(),
        ];
        let resolved = processor.process(&refs).await.unwrap();
        assert_eq!(resolved, refs);
    }

    #[tokio::test]
    async fn test_local_paths_become_data_urls_in_order() {
        let processor = processor_with(&[("/tmp/ref.png", b"pngdata"), ("/tmp/photo.jpg", b"jpg")]);
        let refs = vec![
            "/tmp/ref.png".to_string(),
            "https://example.com/a.png".to_string(),
            "/tmp/photo.jpg".to_string(),
        ];
        let resolved = processor.process(&refs).await.unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(
            resolved[0],
            format!("data:image/png;base64,{}", BASE64.encode(b"pngdata"))
        );
        assert_eq!(resolved[1], "https://example.com/a.png");
        assert_eq!(
            resolved[2],
            format!("data:image/jpeg;base64,{}", BASE64.encode(b"jpg"))
        );
    }

    #[tokio::test]
    async fn test_first_missing_path_aborts_with_that_path() {
        let processor = processor_with(&[("/tmp/ok.png", b"data")]);
        let refs = vec![
            "/tmp/ok.png".to_string(),
            "/tmp/missing.png".to_string(),
            "/tmp/also-missing.png".to_string(),
        ];
        let err = processor.process(&refs).await.unwrap_err();
        match err {
            SeedreamError::ReferenceImageError { path, .. } => {
                assert_eq!(path, "/tmp/missing.png");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
