use crate::{
    config::ArkConfig,
    error::{Result, SeedreamError},
    models::{ArkImageData, ArkImageRequest, ArkImageResponse},
};
use std::time::Duration;

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model_id: String,
}

impl ImageClient {
    pub fn new(config: &ArkConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| SeedreamError::ConfigError(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model_id: config.model_id().to_string(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn generate(&self, request: ArkImageRequest) -> Result<Vec<ArkImageData>> {
        // The key is checked per call so the server can start without one.
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SeedreamError::ConfigError(
                "VOLCENGINE_API_KEY environment variable is not set".to_string(),
            )
        })?;

        let url = format!("{}/images/generations", self.endpoint);

        log::info!("Generating image with model: {}", request.model);
        log::debug!("Requested size: {}", request.size);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SeedreamError::TransportError(format!("Ark API request timed out: {}", e))
                } else {
                    SeedreamError::TransportError(format!("no response from Ark API: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SeedreamError::TransportError(e.to_string()))?;

        let parsed: ArkImageResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(SeedreamError::RemoteGenerationError(format!(
                    "Ark API returned {}: {}",
                    status,
                    truncate(&body, 200)
                )))
            }
            Err(e) => return Err(SeedreamError::ResponseError(e.to_string())),
        };

        if let Some(error) = parsed.error {
            return Err(SeedreamError::RemoteGenerationError(error.message));
        }

        let data = parsed.data.unwrap_or_default();
        if data.is_empty() {
            return Err(SeedreamError::RemoteGenerationError(
                "no images generated".to_string(),
            ));
        }

        Ok(data)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_is_stripped() {
        let config = ArkConfig::new()
            .with_endpoint("https://ark.example.com/api/v3/")
            .with_credentials("k");
        let client = ImageClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "https://ark.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_generate_without_api_key_is_a_config_error() {
        let client = ImageClient::new(&ArkConfig::new()).unwrap();
        let request = ArkImageRequest::new("m", "p", "1024x1024");
        let err = client.generate(request).await.unwrap_err();
        assert!(matches!(err, SeedreamError::ConfigError(_)));
        assert!(err.to_string().contains("VOLCENGINE_API_KEY"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 200), "short");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
