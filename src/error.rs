use std::fmt;

#[derive(Debug)]
pub enum SeedreamError {
    ConfigError(String),
    ValidationError(String),
    ReferenceImageError { path: String, reason: String },
    TransportError(String),
    RemoteGenerationError(String),
    ResponseError(String),
    InternalError(String),
}

impl fmt::Display for SeedreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedreamError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SeedreamError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SeedreamError::ReferenceImageError { path, reason } => {
                write!(f, "Reference image error for '{}': {}", path, reason)
            }
            SeedreamError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            SeedreamError::RemoteGenerationError(msg) => write!(f, "Generation error: {}", msg),
            SeedreamError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            SeedreamError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SeedreamError {}

pub type Result<T> = std::result::Result<T, SeedreamError>;
