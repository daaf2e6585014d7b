//! # reel-payments
//!
//! Payment adapters and plan upgrades for reel.
//!
//! ## Providers
//!
//! | flow            | provider             | upgrades the user                  |
//! |-----------------|----------------------|------------------------------------|
//! | card            | Stripe PaymentIntent | as soon as the intent is created   |
//! | mobile money    | M-Pesa Express       | immediately (no push is sent)      |
//! | gateway         | Paystack             | on the `charge.success` webhook    |
//!
//! ```text
//! ┌─────────────┐  intent   ┌─────────────┐
//! │ PaymentFlows│──────────▶│   Stripe    │
//! │             │  init     ├─────────────┤   charge.success   ┌────────────────┐
//! │             │──────────▶│  Paystack   │───────────────────▶│ WebhookHandler │
//! └──────┬──────┘           └─────────────┘                    └───────┬────────┘
//!        │ upgrade                                                     │ upgrade
//!        ▼                                                             ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          reel_core::Accounts                         │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reel_payments::{PaymentFlows, PaymentRequest};
//!
//! let payment = flows.card_payment(&PaymentRequest {
//!     amount: 9.99,
//!     currency: "usd".into(),
//!     email: "user@example.com".into(),
//! }).await?;
//!
//! // Hand payment.client_secret to Stripe.js
//! ```

pub mod card;
mod error;
mod flows;
pub mod gateway;
pub mod mobile;
mod request;
pub mod webhook;

pub use card::{CardIntent, CardProcessor, StripeCardProcessor, StripeConfig};
pub use error::{PaymentError, Result};
pub use flows::{CardPayment, PaymentFlows};
pub use gateway::{GatewayClient, PaystackClient, PaystackConfig};
pub use mobile::{MobileMoneyReceipt, MpesaConfig, MpesaExpress};
pub use request::PaymentRequest;
pub use webhook::{WebhookEvent, WebhookHandler, WebhookOutcome};
