//! Mobile Money (M-Pesa Express)
//!
//! No STK push is sent and no status is polled: every request is treated as
//! paid. Credentials are loaded so a real integration can slot in here.

use serde::{Deserialize, Serialize};

use crate::request::PaymentRequest;

pub const MPESA_PLACEHOLDER_KEY: &str = "mpesa_key_placeholder";
pub const MPESA_PLACEHOLDER_SECRET: &str = "mpesa_secret_placeholder";
pub const MPESA_SANDBOX_SHORTCODE: &str = "174379";

/// M-Pesa Daraja credentials
#[derive(Clone, Debug)]
pub struct MpesaConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub shortcode: String,
}

impl Default for MpesaConfig {
    fn default() -> Self {
        Self {
            consumer_key: MPESA_PLACEHOLDER_KEY.into(),
            consumer_secret: MPESA_PLACEHOLDER_SECRET.into(),
            shortcode: MPESA_SANDBOX_SHORTCODE.into(),
        }
    }
}

impl MpesaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            consumer_key: std::env::var("MPESA_CONSUMER_KEY").unwrap_or(defaults.consumer_key),
            consumer_secret: std::env::var("MPESA_CONSUMER_SECRET")
                .unwrap_or(defaults.consumer_secret),
            shortcode: std::env::var("MPESA_SHORTCODE").unwrap_or(defaults.shortcode),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.consumer_key == MPESA_PLACEHOLDER_KEY
            || self.consumer_secret == MPESA_PLACEHOLDER_SECRET
    }
}

/// Confirmation of a mobile-money payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileMoneyReceipt {
    pub reference: String,
    pub message: String,
}

/// M-Pesa Express adapter
pub struct MpesaExpress {
    config: MpesaConfig,
}

impl MpesaExpress {
    pub const fn new(config: MpesaConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(MpesaConfig::from_env())
    }

    /// Accept a payment and issue a receipt
    pub fn push(&self, request: &PaymentRequest) -> MobileMoneyReceipt {
        let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        let reference = format!("MPESA-{}", &hex[..10]);

        tracing::info!(
            email = %request.email,
            amount = request.amount,
            currency = %request.currency,
            shortcode = %self.config.shortcode,
            reference = %reference,
            "Accepted M-Pesa Express payment without push confirmation"
        );

        MobileMoneyReceipt {
            reference,
            message: "M-Pesa payment successful. Your plan has been upgraded.".into(),
        }
    }
}
