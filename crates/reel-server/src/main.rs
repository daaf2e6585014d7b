//! reel HTTP Server
//!
//! Axum-based server for signup/login, payment flows, affiliate codes and
//! plan-gated video generation.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reel_core::{Accounts, Affiliates, MemoryAffiliateStore, MemoryUserStore, VideoService};
use reel_payments::{
    MpesaExpress, PaymentFlows, PaystackClient, StripeCardProcessor, WebhookHandler,
};
use reel_runtime::HttpVideoGenerator;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    config.warn_placeholders();

    // Stores
    let accounts = Accounts::new(Arc::new(MemoryUserStore::new()));
    let affiliates = Affiliates::new(Arc::new(MemoryAffiliateStore::new()));

    // Video generation
    let generator = Arc::new(HttpVideoGenerator::from_config(config.video.clone())?);
    let video = VideoService::new(accounts.clone(), generator);

    // Payments
    let payments = PaymentFlows::new(
        accounts.clone(),
        Arc::new(StripeCardProcessor::new(&config.stripe)),
        Arc::new(MpesaExpress::new(config.mpesa.clone())),
        Arc::new(PaystackClient::new(config.paystack.clone())?),
    );

    let webhooks = if config.paystack.verify_signatures {
        WebhookHandler::verified(accounts.clone(), config.paystack.secret_key.clone())
    } else {
        WebhookHandler::new(accounts.clone())
    };

    // Build application state
    let state = AppState {
        accounts,
        affiliates,
        video,
        payments,
        webhooks: Arc::new(webhooks),
        providers: config.provider_status(),
    };

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 reel server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                     - Health check");
    tracing::info!("  POST /api/signup                 - Create account");
    tracing::info!("  POST /api/login                  - Look up account");
    tracing::info!("  POST /api/generate-video         - Generate a video");
    tracing::info!("  POST /api/create-stripe-payment  - Card payment intent");
    tracing::info!("  POST /api/mpesa-express          - M-Pesa payment");
    tracing::info!("  POST /api/paystack-init          - Paystack transaction");
    tracing::info!("  POST /api/paystack-webhook       - Paystack events");
    tracing::info!("  POST /api/affiliate              - Referral code");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
