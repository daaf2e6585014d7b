//! Server Configuration
//!
//! Every provider falls back to a placeholder credential when its variables
//! are unset, so the server always starts.

use reel_payments::{MpesaConfig, PaystackConfig, StripeConfig};
use reel_runtime::VideoApiConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub stripe: StripeConfig,
    pub paystack: PaystackConfig,
    pub mpesa: MpesaConfig,
    pub video: VideoApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            stripe: StripeConfig::default(),
            paystack: PaystackConfig::default(),
            mpesa: MpesaConfig::default(),
            video: VideoApiConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            stripe: StripeConfig::from_env(),
            paystack: PaystackConfig::from_env(),
            mpesa: MpesaConfig::from_env(),
            video: VideoApiConfig::from_env(),
        }
    }

    /// Which providers have real credentials
    pub fn provider_status(&self) -> ProviderStatus {
        ProviderStatus {
            stripe: !self.stripe.is_placeholder(),
            paystack: !self.paystack.is_placeholder(),
            mpesa: !self.mpesa.is_placeholder(),
            video_api: !self.video.is_placeholder(),
        }
    }

    /// Log a warning for each provider still on placeholders
    pub fn warn_placeholders(&self) {
        let status = self.provider_status();
        for (configured, name, vars) in [
            (status.stripe, "Stripe", "STRIPE_SECRET_KEY"),
            (status.paystack, "Paystack", "PAYSTACK_SECRET_KEY"),
            (status.mpesa, "M-Pesa", "MPESA_CONSUMER_KEY and MPESA_CONSUMER_SECRET"),
            (status.video_api, "Video API", "VIDEO_API_URL and VIDEO_API_KEY"),
        ] {
            if configured {
                tracing::info!("✓ {} configured", name);
            } else {
                tracing::warn!("⚠ {} using placeholder credentials - set {} in .env", name, vars);
            }
        }

        if !self.paystack.verify_signatures {
            tracing::warn!(
                "⚠ Paystack webhook signatures are not verified (PAYSTACK_VERIFY_SIGNATURES)"
            );
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProviderStatus {
    pub stripe: bool,
    pub paystack: bool,
    pub mpesa: bool,
    pub video_api: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unconfigured() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.provider_status(), ProviderStatus::default());
    }

    #[test]
    fn test_provider_status_tracks_real_keys() {
        let mut config = ServerConfig::default();
        config.stripe.secret_key = "sk_live_real".into();

        let status = config.provider_status();
        assert!(status.stripe);
        assert!(!status.paystack);
    }
}
