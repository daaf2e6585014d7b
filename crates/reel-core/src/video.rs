//! Video Generation
//!
//! `VideoGenerator` is the seam to the remote generation API. `VideoService`
//! resolves the caller's entitlement, builds the outbound job and validates
//! what comes back.
//!
//! ```rust,ignore
//! let service = VideoService::new(accounts, Arc::new(HttpVideoGenerator::from_env()?));
//! let result = service.generate(VideoRequest {
//!     prompt: "a fox in the snow".into(),
//!     user_email: "alice@x.com".into(),
//! }).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::account::Accounts;
use crate::error::{CoreError, Result};

/// Message returned when the provider does not send its own
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Video generated successfully";

/// Incoming generation request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoRequest {
    pub prompt: String,
    pub user_email: String,
}

/// Payload sent to the generation API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoJob {
    pub prompt: String,
    pub user_email: String,
    pub length_seconds: u64,
}

/// Raw provider response. Every field is optional on the wire.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub video_url: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Result relayed to the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_url: String,
    pub message: String,
}

/// Strategy trait for video generation backends
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Submit a job and return the provider's response.
    ///
    /// Transport and HTTP failures map to [`CoreError::Service`].
    async fn generate(&self, job: &VideoJob) -> Result<GenerationResponse>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Entitlement-aware front for a [`VideoGenerator`]
#[derive(Clone)]
pub struct VideoService {
    accounts: Accounts,
    generator: Arc<dyn VideoGenerator>,
}

impl VideoService {
    pub fn new(accounts: Accounts, generator: Arc<dyn VideoGenerator>) -> Self {
        Self {
            accounts,
            generator,
        }
    }

    /// Generate a video sized to the user's plan
    pub async fn generate(&self, request: VideoRequest) -> Result<VideoResult> {
        let allowance = self.accounts.video_allowance(&request.user_email)?;

        let job = VideoJob {
            prompt: request.prompt,
            user_email: request.user_email,
            length_seconds: allowance.as_secs(),
        };

        tracing::info!(
            email = %job.user_email,
            length_seconds = job.length_seconds,
            backend = %self.generator.name(),
            "Requesting video generation"
        );

        let response = self.generator.generate(&job).await.inspect_err(|e| {
            tracing::error!(email = %job.user_email, error = %e, "Video generation failed");
        })?;

        let video_url = response
            .video_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                CoreError::Service("Video generation failed: no video URL returned".into())
            })?;

        Ok(VideoResult {
            video_url,
            message: response
                .message
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.into()),
        })
    }
}
