use thiserror::Error;

use databot_core::SpecError;

/// Errors emitted while building fixtures.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("trait '{0}' not found")]
    UnknownTrait(String),
    #[error("deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("options error: {0}")]
    Options(#[from] toml::de::Error),
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, BuildError>;
