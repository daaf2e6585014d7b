//! Accounts and Entitlements
//!
//! Users are keyed by email and carry a subscription plan. A plan only ever
//! moves from `Free` to `Paid`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{CoreError, Result};

/// Video length granted to free users
pub const FREE_VIDEO_SECONDS: u64 = 6;

/// Video length granted to paid users
pub const PAID_VIDEO_SECONDS: u64 = 30;

/// Subscription plan tiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Paid,
}

impl Plan {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }

    /// Maximum generated video length for this plan
    pub const fn video_allowance(self) -> Duration {
        match self {
            Self::Free => Duration::from_secs(FREE_VIDEO_SECONDS),
            Self::Paid => Duration::from_secs(PAID_VIDEO_SECONDS),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique key
    pub email: String,

    /// Current plan
    pub plan: Plan,

    /// Signup timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new free-plan user
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            plan: Plan::Free,
            created_at: Utc::now(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.plan == Plan::Paid
    }
}

/// User storage trait
pub trait UserStore: Send + Sync {
    /// Get user by email
    fn get(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user unless the email is taken.
    ///
    /// Returns `false` without writing when a record already exists.
    fn insert_if_absent(&self, user: &User) -> Result<bool>;

    /// Set the plan of an existing user, returning the updated record
    fn set_plan(&self, email: &str, plan: Plan) -> Result<Option<User>>;
}

/// In-memory user store
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("user store lock poisoned".into())
}

impl UserStore for MemoryUserStore {
    fn get(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(email).cloned())
    }

    fn insert_if_absent(&self, user: &User) -> Result<bool> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.contains_key(&user.email) {
            return Ok(false);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(true)
    }

    fn set_plan(&self, email: &str, plan: Plan) -> Result<Option<User>> {
        let mut users = self.users.write().map_err(poisoned)?;
        Ok(users.get_mut(email).map(|user| {
            user.plan = plan;
            user.clone()
        }))
    }
}

/// Signup, login and plan bookkeeping over a [`UserStore`]
#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn UserStore>,
}

impl Accounts {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Accounts backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryUserStore::new()))
    }

    /// Register a new free-plan user
    pub fn signup(&self, email: &str) -> Result<User> {
        let user = User::new(email);
        if !self.store.insert_if_absent(&user)? {
            return Err(CoreError::Conflict("User already exists".into()));
        }

        tracing::info!(email = %email, "User signed up");
        Ok(user)
    }

    /// Look up a user; there is no credential check
    pub fn login(&self, email: &str) -> Result<User> {
        self.store
            .get(email)?
            .ok_or_else(|| CoreError::NotFound("User not found".into()))
    }

    /// Move a user to the paid plan.
    ///
    /// Idempotent. Unknown emails are a no-op and yield `Ok(None)`.
    pub fn upgrade(&self, email: &str) -> Result<Option<User>> {
        let updated = self.store.set_plan(email, Plan::Paid)?;
        match &updated {
            Some(_) => tracing::info!(email = %email, "User upgraded to paid plan"),
            None => tracing::debug!(email = %email, "Upgrade ignored for unknown user"),
        }
        Ok(updated)
    }

    /// Video length the user is entitled to
    pub fn video_allowance(&self, email: &str) -> Result<Duration> {
        let user = self
            .store
            .get(email)?
            .ok_or_else(|| CoreError::Unauthorized("User not found".into()))?;
        Ok(user.plan.video_allowance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_creates_free_user() {
        let accounts = Accounts::in_memory();
        let user = accounts.signup("alice@x.com").unwrap();
        assert_eq!(user.plan, Plan::Free);
        assert_eq!(accounts.login("alice@x.com").unwrap().email, "alice@x.com");
    }

    #[test]
    fn test_duplicate_signup_conflicts() {
        let accounts = Accounts::in_memory();
        accounts.signup("alice@x.com").unwrap();

        let err = accounts.signup("alice@x.com").unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_signup_keeps_existing_plan() {
        let accounts = Accounts::in_memory();
        accounts.signup("alice@x.com").unwrap();
        accounts.upgrade("alice@x.com").unwrap();

        assert!(accounts.signup("alice@x.com").is_err());
        assert!(accounts.login("alice@x.com").unwrap().is_paid());
    }

    #[test]
    fn test_login_unknown_user() {
        let accounts = Accounts::in_memory();
        let err = accounts.login("ghost@x.com").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let accounts = Accounts::in_memory();
        accounts.signup("bob@x.com").unwrap();

        for _ in 0..3 {
            let user = accounts.upgrade("bob@x.com").unwrap().unwrap();
            assert_eq!(user.plan, Plan::Paid);
        }
        assert_eq!(accounts.login("bob@x.com").unwrap().plan, Plan::Paid);
    }

    #[test]
    fn test_upgrade_unknown_user_is_noop() {
        let accounts = Accounts::in_memory();
        assert!(accounts.upgrade("ghost@x.com").unwrap().is_none());
        assert!(accounts.login("ghost@x.com").is_err());
    }

    #[test]
    fn test_video_allowance_by_plan() {
        let accounts = Accounts::in_memory();
        accounts.signup("carol@x.com").unwrap();
        assert_eq!(
            accounts.video_allowance("carol@x.com").unwrap(),
            Duration::from_secs(6)
        );

        accounts.upgrade("carol@x.com").unwrap();
        assert_eq!(
            accounts.video_allowance("carol@x.com").unwrap(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_video_allowance_unknown_user() {
        let accounts = Accounts::in_memory();
        let err = accounts.video_allowance("ghost@x.com").unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[test]
    fn test_concurrent_signups_yield_one_winner() {
        let accounts = Accounts::in_memory();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let accounts = accounts.clone();
                std::thread::spawn(move || accounts.signup("race@x.com").is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_plan_serializes_lowercase() {
        let user = User::new("dave@x.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["plan"], "free");
        assert_eq!(Plan::Paid.to_string(), "paid");
    }
}
