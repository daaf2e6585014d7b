//! # reel-runtime
//!
//! Runtime providers for reel.
//!
//! ## Providers
//!
//! - **Video API** (default): JSON generation endpoint with bearer auth
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reel_runtime::HttpVideoGenerator;
//!
//! let generator = Arc::new(HttpVideoGenerator::from_env()?);
//! let service = VideoService::new(accounts, generator);
//! ```

pub mod video_api;

pub use video_api::{HttpVideoGenerator, VideoApiConfig};

// Re-export core types for convenience
pub use reel_core::{CoreError, GenerationResponse, Result, VideoGenerator, VideoJob};
