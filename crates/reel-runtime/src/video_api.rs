//! HTTP Video Generation Provider
//!
//! Implementation of `VideoGenerator` for a JSON generation API authenticated
//! with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reel_core::{
    error::{CoreError, Result},
    video::{GenerationResponse, VideoGenerator, VideoJob},
};

pub const VIDEO_API_PLACEHOLDER_URL: &str = "https://api.video-generator.example/v1/generate";
pub const VIDEO_API_PLACEHOLDER_KEY: &str = "video_api_key_placeholder";

/// Video API configuration
#[derive(Clone, Debug)]
pub struct VideoApiConfig {
    /// Full URL jobs are POSTed to
    pub endpoint: String,

    /// Bearer token
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VideoApiConfig {
    fn default() -> Self {
        Self {
            endpoint: VIDEO_API_PLACEHOLDER_URL.into(),
            api_key: VIDEO_API_PLACEHOLDER_KEY.into(),
            timeout_secs: 120,
        }
    }
}

impl VideoApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("VIDEO_API_URL").unwrap_or(defaults.endpoint),
            api_key: std::env::var("VIDEO_API_KEY").unwrap_or(defaults.api_key),
            timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.api_key == VIDEO_API_PLACEHOLDER_KEY
    }
}

/// reqwest-backed video generator
pub struct HttpVideoGenerator {
    http: reqwest::Client,
    config: VideoApiConfig,
}

impl HttpVideoGenerator {
    /// Create from configuration
    pub fn from_config(config: VideoApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(VideoApiConfig::from_env())
    }
}

#[async_trait]
impl VideoGenerator for HttpVideoGenerator {
    async fn generate(&self, job: &VideoJob) -> Result<GenerationResponse> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(job)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    endpoint = %self.config.endpoint,
                    error = %e,
                    "Video API request failed"
                );
                CoreError::Service(format!("Video generation failed: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Service(format!("Video generation failed: {e}")))?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                endpoint = %self.config.endpoint,
                "Video API returned an error status"
            );
            return Err(CoreError::Service(format!(
                "Video generation failed ({status}): {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(
                status = %status,
                endpoint = %self.config.endpoint,
                error = %e,
                "Video API response could not be decoded"
            );
            CoreError::Service(format!("Invalid video API response: {e}"))
        })
    }

    fn name(&self) -> &str {
        "video-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/generate")
    }

    fn generator(endpoint: String) -> HttpVideoGenerator {
        HttpVideoGenerator::from_config(VideoApiConfig {
            endpoint,
            api_key: "vk_test".into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn job() -> VideoJob {
        VideoJob {
            prompt: "a fox in the snow".into(),
            user_email: "alice@x.com".into(),
            length_seconds: 6,
        }
    }

    async fn record_job(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        seen.lock().await.push((auth, body));
        Json(serde_json::json!({"video_url": "https://cdn/v.mp4"}))
    }

    #[tokio::test]
    async fn test_generate_posts_job_with_bearer_token() {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/generate", post(record_job))
            .with_state(seen.clone());

        let endpoint = spawn(router).await;
        let response = generator(endpoint).generate(&job()).await.unwrap();
        assert_eq!(response.video_url.as_deref(), Some("https://cdn/v.mp4"));
        assert!(response.message.is_none());

        let seen = seen.lock().await;
        assert_eq!(seen[0].0.as_deref(), Some("Bearer vk_test"));
        assert_eq!(
            seen[0].1,
            serde_json::json!({
                "prompt": "a fox in the snow",
                "user_email": "alice@x.com",
                "length_seconds": 6
            })
        );
    }

    #[tokio::test]
    async fn test_error_status_is_service_error() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::BAD_GATEWAY, "model offline") }),
        );

        let endpoint = spawn(router).await;
        let err = generator(endpoint).generate(&job()).await.unwrap_err();
        match err {
            CoreError::Service(msg) => assert!(msg.contains("model offline")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_without_url_decodes() {
        let router = Router::new().route(
            "/generate",
            post(|| async { Json(serde_json::json!({"status": "queued"})) }),
        );

        let endpoint = spawn(router).await;
        let response = generator(endpoint).generate(&job()).await.unwrap();
        assert!(response.video_url.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_service_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = generator(format!("http://{addr}/generate"))
            .generate(&job())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Service(_)));
    }

    #[test]
    fn test_default_config_is_placeholder() {
        assert!(VideoApiConfig::default().is_placeholder());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_service_error() {
        let router = Router::new().route("/generate", post(|| async { "<html>oops</html>" }));

        let endpoint = spawn(router).await;
        let err = generator(endpoint).generate(&job()).await.unwrap_err();
        match err {
            CoreError::Service(msg) => assert!(msg.starts_with("Invalid video API response")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
