//! HTTP Error Mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use reel_core::CoreError;
use reel_payments::PaymentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    Payment(PaymentError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Account(inner) => Self::Core(inner),
            other => Self::Payment(other),
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Core(err) => match err {
                CoreError::Conflict(_) => (StatusCode::BAD_REQUEST, "USER_EXISTS"),
                CoreError::NotFound(_) => (StatusCode::BAD_REQUEST, "USER_NOT_FOUND"),
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                CoreError::Service(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVICE_ERROR"),
                CoreError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
                CoreError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            },
            Self::Payment(err) => match err {
                PaymentError::Card(_) => (StatusCode::BAD_REQUEST, "PAYMENT_ERROR"),
                PaymentError::UnsupportedCurrency(_) => {
                    (StatusCode::BAD_REQUEST, "UNSUPPORTED_CURRENCY")
                }
                PaymentError::WebhookSignature(_) => (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE"),
                PaymentError::WebhookParse(_) => (StatusCode::BAD_REQUEST, "INVALID_WEBHOOK"),
                PaymentError::Gateway(_) => (StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_ERROR"),
                PaymentError::Config(_) | PaymentError::Account(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "PAYMENT_CONFIG_ERROR")
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Core(err) => err.user_message(),
            Self::Payment(err) => err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        if status.is_server_error() {
            tracing::error!(code = code, error = ?self, "Request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.message(),
                code: code.into(),
            }),
        )
            .into_response()
    }
}
