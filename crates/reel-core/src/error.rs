//! Error Types

use thiserror::Error;

/// Result type alias for account and video operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Record already exists (duplicate signup)
    #[error("{0}")]
    Conflict(String),

    /// Record not found
    #[error("{0}")]
    NotFound(String),

    /// Caller is not a known user
    #[error("{0}")]
    Unauthorized(String),

    /// Upstream service failed or returned an unusable response
    #[error("{0}")]
    Service(String),

    /// Storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Message shown to API clients.
    ///
    /// Validation and provider messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Service(msg) => msg.clone(),
            Self::Storage(_) => "Storage is temporarily unavailable.".into(),
            Self::Config(_) => "Service configuration error.".into(),
        }
    }
}
