//! Paystack Webhook Handling
//!
//! Only `charge.success` changes state. Events are not deduplicated; a replay
//! re-applies the same idempotent upgrade.

use hmac::{Hmac, Mac};
use reel_core::Accounts;
use serde::{Deserialize, Serialize};
use sha2::Sha512;

use crate::error::{PaymentError, Result};

/// Event type that upgrades the paying customer
pub const CHARGE_SUCCESS: &str = "charge.success";

/// Header carrying the hex HMAC-SHA512 of the raw body
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

type HmacSha512 = Hmac<Sha512>;

/// Envelope only; `data` is decoded once the event type is known
#[derive(Debug, Deserialize)]
struct RawEvent {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChargeData {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    customer: Option<RawCustomer>,
}

#[derive(Debug, Deserialize)]
struct RawCustomer {
    #[serde(default)]
    email: Option<String>,
}

/// Parsed webhook event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookEvent {
    /// A charge completed for this customer
    ChargeSucceeded {
        customer_email: String,
        reference: Option<String>,
    },

    /// Anything else; acknowledged and dropped
    Other { event_type: String },
}

/// Result reported back to the provider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookOutcome {
    Success,
    Ignored,
}

/// Check `signature` against HMAC-SHA512(secret, payload) in constant time
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> Result<()> {
    let expected = hex::decode(signature.trim())
        .map_err(|_| PaymentError::WebhookSignature("signature is not hex".into()))?;

    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::Config(e.to_string()))?;
    mac.update(payload);
    mac.verify_slice(&expected)
        .map_err(|_| PaymentError::WebhookSignature("signature mismatch".into()))
}

/// Parse a raw webhook body
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent> {
    let raw: RawEvent =
        serde_json::from_slice(payload).map_err(|e| PaymentError::WebhookParse(e.to_string()))?;

    if raw.event != CHARGE_SUCCESS {
        return Ok(WebhookEvent::Other {
            event_type: raw.event,
        });
    }

    let data: ChargeData = serde_json::from_value(raw.data)
        .map_err(|e| PaymentError::WebhookParse(format!("invalid charge.success data: {e}")))?;

    let customer_email = data
        .customer
        .and_then(|c| c.email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| {
            PaymentError::WebhookParse("charge.success without customer email".into())
        })?;

    Ok(WebhookEvent::ChargeSucceeded {
        customer_email,
        reference: data.reference,
    })
}

/// Webhook handler
pub struct WebhookHandler {
    accounts: Accounts,
    signing_secret: Option<String>,
}

impl WebhookHandler {
    /// Handler that accepts unsigned payloads
    pub const fn new(accounts: Accounts) -> Self {
        Self {
            accounts,
            signing_secret: None,
        }
    }

    /// Handler that requires a valid signature on every payload
    pub fn verified(accounts: Accounts, signing_secret: impl Into<String>) -> Self {
        Self {
            accounts,
            signing_secret: Some(signing_secret.into()),
        }
    }

    /// Verify (when configured), parse and apply a webhook body
    pub fn receive(&self, payload: &[u8], signature: Option<&str>) -> Result<WebhookOutcome> {
        if let Some(secret) = &self.signing_secret {
            let signature = signature
                .ok_or_else(|| PaymentError::WebhookSignature("missing signature".into()))?;
            verify_signature(payload, signature, secret)?;
        }

        let event = parse_event(payload)?;
        self.handle(&event)
    }

    /// Apply a parsed event
    pub fn handle(&self, event: &WebhookEvent) -> Result<WebhookOutcome> {
        match event {
            WebhookEvent::ChargeSucceeded {
                customer_email,
                reference,
            } => {
                tracing::info!(
                    email = %customer_email,
                    reference = ?reference,
                    "Processing Paystack charge.success"
                );
                if self.accounts.upgrade(customer_email)?.is_none() {
                    tracing::warn!(email = %customer_email, "charge.success for unknown user");
                }
                Ok(WebhookOutcome::Success)
            }

            WebhookEvent::Other { event_type } => {
                tracing::debug!(event_type = %event_type, "Unhandled webhook event");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }
}
