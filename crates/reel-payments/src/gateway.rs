//! Payment Gateway (Paystack)
//!
//! Transaction initialization only. The response is handed back untouched so
//! the client can follow Paystack's `authorization_url`; completion arrives
//! later through the webhook.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::{PaymentError, Result};
use crate::request::PaymentRequest;

pub const PAYSTACK_PLACEHOLDER_KEY: &str = "sk_test_paystack_placeholder";
pub const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

/// Paystack configuration
#[derive(Clone, Debug)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,

    /// Require a valid `x-paystack-signature` on webhooks
    pub verify_signatures: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            secret_key: PAYSTACK_PLACEHOLDER_KEY.into(),
            base_url: PAYSTACK_BASE_URL.into(),
            verify_signatures: false,
            timeout_secs: 120,
        }
    }
}

impl PaystackConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret_key: std::env::var("PAYSTACK_SECRET_KEY").unwrap_or(defaults.secret_key),
            base_url: std::env::var("PAYSTACK_BASE_URL").unwrap_or(defaults.base_url),
            verify_signatures: std::env::var("PAYSTACK_VERIFY_SIGNATURES")
                .ok()
                .and_then(|v| {
                    let flag = parse_flag(&v);
                    if flag.is_none() {
                        tracing::warn!(
                            value = %v,
                            "Unrecognized PAYSTACK_VERIFY_SIGNATURES value"
                        );
                    }
                    flag
                })
                .unwrap_or(defaults.verify_signatures),
            timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.secret_key == PAYSTACK_PLACEHOLDER_KEY
    }
}

/// Parse a boolean environment flag (`1/true/yes/on`, `0/false/no/off`)
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Gateway seam
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Initialize a transaction and return the provider body as-is
    async fn initialize(&self, request: &PaymentRequest) -> Result<Value>;

    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct InitializeTransaction<'a> {
    email: &'a str,
    amount: i64,
}

/// Paystack REST client
pub struct PaystackClient {
    http: reqwest::Client,
    config: PaystackConfig,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PaystackConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl GatewayClient for PaystackClient {
    async fn initialize(&self, request: &PaymentRequest) -> Result<Value> {
        let body = InitializeTransaction {
            email: &request.email,
            amount: request.minor_units(),
        };

        let response = self
            .http
            .post(self.url("/transaction/initialize"))
            .bearer_auth(&self.config.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = %status,
                email = %request.email,
                "Paystack initialize returned an error status"
            );
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PaymentError::Gateway(format!("Invalid Paystack response: {e}")))
    }

    fn name(&self) -> &str {
        "paystack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> PaystackClient {
        PaystackClient::new(PaystackConfig {
            secret_key: "sk_test_abc".into(),
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: 25.5,
            currency: "NGN".into(),
            email: "alice@x.com".into(),
        }
    }

    async fn record_initialize(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        seen.lock().await.push((auth, body));
        Json(serde_json::json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/x",
                "reference": "r1"
            }
        }))
    }

    #[tokio::test]
    async fn test_initialize_forwards_email_and_minor_units() {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/transaction/initialize", post(record_initialize))
            .with_state(seen.clone());

        let base = spawn(router).await;
        let response = client(base).initialize(&request()).await.unwrap();
        assert_eq!(response["data"]["reference"], "r1");

        let seen = seen.lock().await;
        assert_eq!(seen[0].0.as_deref(), Some("Bearer sk_test_abc"));
        assert_eq!(seen[0].1, serde_json::json!({"email": "alice@x.com", "amount": 2550}));
    }

    #[tokio::test]
    async fn test_initialize_relays_error_body_verbatim() {
        let router = Router::new().route(
            "/transaction/initialize",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"status": false, "message": "Invalid key"})),
                )
            }),
        );

        let base = spawn(router).await;
        let response = client(base).initialize(&request()).await.unwrap();
        assert_eq!(response, serde_json::json!({"status": false, "message": "Invalid key"}));
    }

    #[tokio::test]
    async fn test_initialize_non_json_is_gateway_error() {
        let router = Router::new().route("/transaction/initialize", post(|| async { "oops" }));

        let base = spawn(router).await;
        let err = client(base).initialize(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Gateway(_)));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client("http://paystack.local/".into());
        assert_eq!(
            client.url("/transaction/initialize"),
            "http://paystack.local/transaction/initialize"
        );
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for value in ["1", "true", "TRUE", "True", "yes", "on", " On "] {
            assert_eq!(parse_flag(value), Some(true), "{value}");
        }
        for value in ["0", "false", "False", "no", "OFF", ""] {
            assert_eq!(parse_flag(value), Some(false), "{value}");
        }
        assert_eq!(parse_flag("enabled"), None);
    }
}
