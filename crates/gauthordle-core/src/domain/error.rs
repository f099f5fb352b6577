//! Error taxonomy for puzzle construction and play.

/// gauthordle errors.
///
/// Every variant is fatal to puzzle construction. Nothing is retried
/// internally; callers surface the message and halt.
#[derive(Debug, thiserror::Error)]
pub enum GauthordleError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid author filter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("git error: {0}")]
    Collaborator(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GauthordleError {
    /// Whether this error stems from user configuration rather than the repository.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidPattern { .. } | Self::Yaml(_)
        )
    }
}

/// Result type for gauthordle operations.
pub type Result<T> = std::result::Result<T, GauthordleError>;
