use std::env;

pub const DEFAULT_ENDPOINT: &str = "https://ark.cn-beijing.volces.com/api/v3";
pub const DEFAULT_MODEL_ID: &str = "doubao-seedream-4-0-250828";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct ArkConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ArkConfig {
    fn default() -> Self {
        ArkConfig {
            endpoint: None,
            api_key: None,
            model_id: None,
            timeout_secs: None,
        }
    }
}

impl ArkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint = env::var("VOLCENGINE_API_ENDPOINT").ok();
        let api_key = env::var("VOLCENGINE_API_KEY").ok();
        let model_id = env::var("SEEDREAM_MODEL_ID").ok();
        let timeout_secs = env::var("SEEDREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        ArkConfig {
            endpoint,
            api_key,
            model_id,
            timeout_secs,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
