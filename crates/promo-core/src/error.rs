/// Core error types for the promo renderer.
use std::path::PathBuf;

/// A specialized Result type for promo operations.
pub type PromoResult<T> = Result<T, PromoError>;

/// Top-level error type encompassing all promo subsystems.
#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    #[error("network error: {0}")]
    Network(String),

    #[error("archive error: {message} ({path:?})")]
    Archive { message: String, path: PathBuf },

    #[error("bundle error: {0}")]
    Bundle(String),

    #[error("composition error: {0}")]
    Composition(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl PromoError {
    /// Create an archive error.
    pub fn archive(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        PromoError::Archive {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a composition error for an id that is not registered.
    pub fn unknown_composition(id: &str, known: &[&str]) -> Self {
        PromoError::Composition(format!(
            "no composition with id '{}' (available: {})",
            id,
            known.join(", ")
        ))
    }
}
