//! Card Payments (Stripe PaymentIntents)
//!
//! The client confirms the intent with Stripe.js using the returned client
//! secret; this side only creates it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stripe::{Client, CreatePaymentIntent, Currency, PaymentIntent, StripeError};

use crate::error::{PaymentError, Result};
use crate::request::PaymentRequest;

pub const STRIPE_PLACEHOLDER_KEY: &str = "sk_test_placeholder";

/// Stripe configuration
#[derive(Clone, Debug)]
pub struct StripeConfig {
    pub secret_key: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: STRIPE_PLACEHOLDER_KEY.into(),
        }
    }
}

impl StripeConfig {
    pub fn from_env() -> Self {
        Self {
            secret_key: std::env::var("STRIPE_SECRET_KEY")
                .unwrap_or_else(|_| STRIPE_PLACEHOLDER_KEY.into()),
        }
    }

    /// Still running on the insecure default
    pub fn is_placeholder(&self) -> bool {
        self.secret_key == STRIPE_PLACEHOLDER_KEY
    }
}

/// A created card payment awaiting client-side confirmation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIntent {
    pub id: String,
    pub client_secret: String,
}

/// Card processor seam
#[async_trait]
pub trait CardProcessor: Send + Sync {
    /// Create a remote payment intent for the request
    async fn create_intent(&self, request: &PaymentRequest) -> Result<CardIntent>;

    fn name(&self) -> &str;
}

/// Parse a currency code into Stripe's enum (codes are lowercase on the wire)
pub fn parse_currency(code: &str) -> Result<Currency> {
    let lower = code.trim().to_lowercase();
    serde_json::from_value(serde_json::Value::String(lower.clone()))
        .map_err(|_| PaymentError::UnsupportedCurrency(lower))
}

/// Stripe error text with the provider's own message when it sent one
fn provider_message(err: StripeError) -> String {
    match err {
        StripeError::Stripe(req) => req.message.unwrap_or_else(|| {
            format!("Stripe request failed with status {}", req.http_status)
        }),
        other => other.to_string(),
    }
}

/// Stripe-backed card processor
pub struct StripeCardProcessor {
    client: Client,
}

impl StripeCardProcessor {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            client: Client::new(config.secret_key.clone()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&StripeConfig::from_env())
    }
}

#[async_trait]
impl CardProcessor for StripeCardProcessor {
    async fn create_intent(&self, request: &PaymentRequest) -> Result<CardIntent> {
        let currency = parse_currency(&request.currency)?;

        let mut params = CreatePaymentIntent::new(request.minor_units(), currency);
        params.receipt_email = Some(request.email.as_str());

        let intent = PaymentIntent::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Card(provider_message(e)))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Card("No client secret returned".into()))?;

        Ok(CardIntent {
            id: intent.id.to_string(),
            client_secret,
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
