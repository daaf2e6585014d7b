//! Payment Flows
//!
//! Ties each adapter to plan bookkeeping. Upgrades here are optimistic: the
//! card flow upgrades as soon as the intent exists and the mobile-money flow
//! upgrades unconditionally. Only the gateway defers to its webhook.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use reel_core::Accounts;

use crate::card::CardProcessor;
use crate::error::Result;
use crate::gateway::GatewayClient;
use crate::mobile::{MobileMoneyReceipt, MpesaExpress};
use crate::request::PaymentRequest;

/// Card flow result handed to the browser
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPayment {
    pub client_secret: String,
}

/// Payment entry points shared by the HTTP layer
#[derive(Clone)]
pub struct PaymentFlows {
    accounts: Accounts,
    card: Arc<dyn CardProcessor>,
    mobile: Arc<MpesaExpress>,
    gateway: Arc<dyn GatewayClient>,
}

impl PaymentFlows {
    pub fn new(
        accounts: Accounts,
        card: Arc<dyn CardProcessor>,
        mobile: Arc<MpesaExpress>,
        gateway: Arc<dyn GatewayClient>,
    ) -> Self {
        Self {
            accounts,
            card,
            mobile,
            gateway,
        }
    }

    /// Create a card intent, then upgrade the payer
    pub async fn card_payment(&self, request: &PaymentRequest) -> Result<CardPayment> {
        let intent = self.card.create_intent(request).await.inspect_err(|e| {
            tracing::warn!(
                processor = %self.card.name(),
                email = %request.email,
                error = %e,
                "Card intent creation failed"
            );
        })?;

        tracing::info!(
            processor = %self.card.name(),
            intent_id = %intent.id,
            email = %request.email,
            "Card intent created"
        );

        self.accounts.upgrade(&request.email)?;

        Ok(CardPayment {
            client_secret: intent.client_secret,
        })
    }

    /// Accept a mobile-money payment and upgrade the payer
    pub fn mobile_money(&self, request: &PaymentRequest) -> Result<MobileMoneyReceipt> {
        let receipt = self.mobile.push(request);
        self.accounts.upgrade(&request.email)?;
        Ok(receipt)
    }

    /// Initialize a gateway transaction. No upgrade happens here.
    pub async fn gateway_init(&self, request: &PaymentRequest) -> Result<Value> {
        self.gateway.initialize(request).await.inspect_err(|e| {
            tracing::error!(
                gateway = %self.gateway.name(),
                email = %request.email,
                error = %e,
                "Gateway initialize failed"
            );
        })
    }
}
