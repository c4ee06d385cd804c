use serde::{Deserialize, Serialize};

/// Request body for the Ark `images/generations` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ArkImageRequest {
    pub model: String,
    pub prompt: String,
    /// Size token in the form "WIDTHxHEIGHT".
    pub size: String,
    pub sequential_image_generation: &'static str,
    pub stream: bool,
    pub response_format: &'static str,
    pub watermark: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<String>>,
}

impl ArkImageRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            size: size.into(),
            sequential_image_generation: "disabled",
            stream: false,
            response_format: "url",
            watermark: true,
            n: None,
            seed: None,
            image: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArkImageResponse {
    #[serde(default)]
    pub data: Option<Vec<ArkImageData>>,
    #[serde(default)]
    pub error: Option<ArkApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArkImageData {
    pub url: String,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArkApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}
