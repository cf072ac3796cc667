use thiserror::Error;

/// Simplified error enum for common use cases
#[derive(Error, Debug)]
pub enum ScribeError {
    /// WebSocket-related errors
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// Extraction pipeline errors
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// External AI service errors
    #[error("External service error: {0}")]
    ExternalError(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Document rendering errors
    #[error("Rendering error: {0}")]
    RenderError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for scribe engine operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Async logging function for errors
pub async fn log_error(context: &str, error: &ScribeError) {
    tracing::error!(
        context = context,
        error = %error,
        "scribe engine error occurred"
    );
}
