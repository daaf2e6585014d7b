//! Payment Error Types

use reel_core::CoreError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Card processor rejected the request (message is the provider's)
    #[error("{0}")]
    Card(String),

    /// Currency code the card processor does not know
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Payment gateway unreachable or returned an unusable body
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Webhook signature verification failed
    #[error("Webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Webhook payload parsing failed
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Account bookkeeping failed
    #[error(transparent)]
    Account(#[from] CoreError),
}

impl PaymentError {
    /// Message shown to API clients
    pub fn user_message(&self) -> String {
        match self {
            Self::Card(msg) => msg.clone(),
            Self::Account(inner) => inner.user_message(),
            Self::Config(_) => "Service configuration error.".into(),
            other => other.to_string(),
        }
    }
}
