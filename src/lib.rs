pub mod ark;
pub mod config;
pub mod error;
pub mod generation;
pub mod logger;
pub mod models;
pub mod server;

pub use ark::{ArkClient, ImageClient};
pub use config::ArkConfig;
pub use error::{Result, SeedreamError};
pub use generation::{BatchRunner, TaskExecutor};
pub use server::SeedreamService;
