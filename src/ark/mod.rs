pub mod image_client;

use crate::{config::ArkConfig, error::Result};

pub use image_client::ImageClient;

/// Entry point for the Volcengine Ark API.
#[derive(Clone)]
pub struct ArkClient {
    image_client: ImageClient,
}

impl ArkClient {
    pub fn new(config: &ArkConfig) -> Result<Self> {
        Ok(Self {
            image_client: ImageClient::new(config)?,
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
