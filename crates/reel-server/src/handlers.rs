//! HTTP Handlers

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use reel_core::{User, VideoRequest, VideoResult};
use reel_payments::{
    CardPayment, MobileMoneyReceipt, PaymentRequest, WebhookOutcome, webhook::SIGNATURE_HEADER,
};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub paystack_configured: bool,
    pub mpesa_configured: bool,
    pub video_api_configured: bool,
}

/// Signup body. Amount and currency are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AffiliateRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AffiliateResponse {
    pub referral_code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookStatus {
    pub status: WebhookOutcome,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.providers.stripe,
        paystack_configured: state.providers.paystack,
        mpesa_configured: state.providers.mpesa,
        video_api_configured: state.providers.video_api,
    })
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.amount.is_some() || payload.currency.is_some() {
        tracing::debug!(email = %payload.email, "Ignoring payment fields on signup");
    }

    state.accounts.signup(&payload.email)?;

    Ok(Json(MessageResponse {
        message: "Signup successful".into(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.accounts.login(&payload.email)?;

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user,
    }))
}

pub async fn generate_video(
    State(state): State<AppState>,
    Json(payload): Json<VideoRequest>,
) -> Result<Json<VideoResult>, ApiError> {
    Ok(Json(state.video.generate(payload).await?))
}

pub async fn create_stripe_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<CardPayment>, ApiError> {
    Ok(Json(state.payments.card_payment(&payload).await?))
}

pub async fn mpesa_express(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<MobileMoneyReceipt>, ApiError> {
    Ok(Json(state.payments.mobile_money(&payload)?))
}

/// Relays Paystack's initialize response untouched
pub async fn paystack_init(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.payments.gateway_init(&payload).await?))
}

/// Paystack webhook; the raw body is needed for signature checks
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookStatus>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let status = state.webhooks.receive(&body, signature).inspect_err(|e| {
        tracing::warn!("Webhook rejected: {}", e);
    })?;

    Ok(Json(WebhookStatus { status }))
}

pub async fn create_affiliate(
    State(state): State<AppState>,
    Json(payload): Json<AffiliateRequest>,
) -> Result<Json<AffiliateResponse>, ApiError> {
    let affiliate = state.affiliates.register(&payload.email)?;

    Ok(Json(AffiliateResponse {
        referral_code: affiliate.code,
        message: "Affiliate link created".into(),
    }))
}
