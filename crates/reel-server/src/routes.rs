//! Router

use axum::{Router, routing::{get, post}};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    create_affiliate, create_stripe_payment, generate_video, health_check, login, mpesa_express,
    paystack_init, paystack_webhook, signup,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))

        // Accounts
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/affiliate", post(create_affiliate))

        // Video
        .route("/api/generate-video", post(generate_video))

        // Payments
        .route("/api/create-stripe-payment", post(create_stripe_payment))
        .route("/api/mpesa-express", post(mpesa_express))
        .route("/api/paystack-init", post(paystack_init))
        .route("/api/paystack-webhook", post(paystack_webhook))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
