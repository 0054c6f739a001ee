use thiserror::Error;

/// Errors raised while declaring or validating a field specification.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The specification cannot produce a value (empty options, bad literal...).
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),
    /// A declarative generator tag that no generator kind answers to.
    #[error("unsupported generator kind: {0}")]
    UnsupportedGeneratorKind(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by the specification model.
pub type Result<T> = std::result::Result<T, SpecError>;
