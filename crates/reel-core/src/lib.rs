//! # reel-core
//!
//! Accounts, plan entitlements, affiliate codes and entitlement-aware video
//! generation for reel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      VideoService                           │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Accounts   │──│  UserStore  │  │   VideoGenerator    │  │
//! │  │ (allowance) │  │   (trait)   │  │     (Strategy)      │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and the generation backend are both traits, so tests and
//! alternative deployments can swap them without touching the logic.

pub mod account;
pub mod affiliate;
pub mod error;
pub mod video;

pub use account::{Accounts, MemoryUserStore, Plan, User, UserStore};
pub use affiliate::{Affiliate, AffiliateStore, Affiliates, MemoryAffiliateStore};
pub use error::{CoreError, Result};
pub use video::{
    GenerationResponse, VideoGenerator, VideoJob, VideoRequest, VideoResult, VideoService,
};
