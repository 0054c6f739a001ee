use thiserror::Error;

/// Errors raised while emitting a skeleton builder.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
