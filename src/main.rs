use rmcp::{transport::stdio, ServiceExt};
use seedream_mcp::{logger, ArkConfig, SeedreamService, TaskExecutor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(logger::LoggerConfig::production())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    let config = ArkConfig::from_env();
    log::info!("🎨 Model: {}", config.model_id());
    log::info!("🌐 Endpoint: {}", config.endpoint());
    if config.api_key.is_none() {
        log::warn!("⚠️  VOLCENGINE_API_KEY environment variable is not set!");
        log::warn!("Please configure your API key in the MCP client configuration.");
    }

    let executor = match TaskExecutor::new(&config) {
        Ok(executor) => executor,
        Err(e) => {
            log::error!("❌ Failed to initialize the Ark client: {}", e);
            return Err(e.into());
        }
    };

    let service = SeedreamService::new(executor).serve(stdio()).await?;
    log::info!("🚀 SeedDream 4.0 MCP server running");
    log::info!("📡 Connected via stdio transport");

    service.waiting().await?;
    Ok(())
}
