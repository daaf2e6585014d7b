//! Application State

use std::sync::Arc;

use reel_core::{Accounts, Affiliates, VideoService};
use reel_payments::{PaymentFlows, WebhookHandler};

use crate::config::ProviderStatus;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Signup, login and plan bookkeeping
    pub accounts: Accounts,

    /// Referral codes
    pub affiliates: Affiliates,

    /// Entitlement-aware video generation
    pub video: VideoService,

    /// Card, mobile-money and gateway flows
    pub payments: PaymentFlows,

    /// Paystack webhook processing
    pub webhooks: Arc<WebhookHandler>,

    /// Which providers run on real credentials
    pub providers: ProviderStatus,
}
