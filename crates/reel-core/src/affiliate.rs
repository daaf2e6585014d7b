//! Affiliate Referral Codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, Result};

/// Suffix appended to the email local part
pub const REFERRAL_SUFFIX: &str = "_ref";

/// Referral code derived from an email (`alice@x.com` -> `alice_ref`)
pub fn referral_code(email: &str) -> String {
    let local = email.split_once('@').map_or(email, |(local, _)| local);
    format!("{local}{REFERRAL_SUFFIX}")
}

/// An affiliate record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
    pub code: String,
    pub email: String,
    pub commission: f64,
    pub created_at: DateTime<Utc>,
}

impl Affiliate {
    /// Create a zero-commission affiliate for an email
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            code: referral_code(&email),
            email,
            commission: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// Affiliate storage trait
pub trait AffiliateStore: Send + Sync {
    /// Save or replace an affiliate under its code
    fn save(&self, affiliate: &Affiliate) -> Result<()>;

    /// Get affiliate by referral code
    fn get(&self, code: &str) -> Result<Option<Affiliate>>;
}

/// In-memory affiliate store
pub struct MemoryAffiliateStore {
    affiliates: RwLock<HashMap<String, Affiliate>>,
}

impl Default for MemoryAffiliateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAffiliateStore {
    pub fn new() -> Self {
        Self {
            affiliates: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("affiliate store lock poisoned".into())
}

impl AffiliateStore for MemoryAffiliateStore {
    fn save(&self, affiliate: &Affiliate) -> Result<()> {
        let mut affiliates = self.affiliates.write().map_err(poisoned)?;
        affiliates.insert(affiliate.code.clone(), affiliate.clone());
        Ok(())
    }

    fn get(&self, code: &str) -> Result<Option<Affiliate>> {
        let affiliates = self.affiliates.read().map_err(poisoned)?;
        Ok(affiliates.get(code).cloned())
    }
}

/// Affiliate registration over an [`AffiliateStore`]
#[derive(Clone)]
pub struct Affiliates {
    store: Arc<dyn AffiliateStore>,
}

impl Affiliates {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryAffiliateStore::new()))
    }

    /// Register an affiliate. Re-registering resets commission to zero.
    pub fn register(&self, email: &str) -> Result<Affiliate> {
        let affiliate = Affiliate::new(email);
        self.store.save(&affiliate)?;

        tracing::info!(email = %email, code = %affiliate.code, "Affiliate registered");
        Ok(affiliate)
    }

    pub fn lookup(&self, code: &str) -> Result<Option<Affiliate>> {
        self.store.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_code_from_local_part() {
        assert_eq!(referral_code("alice@x.com"), "alice_ref");
        assert_eq!(referral_code("no-at-sign"), "no-at-sign_ref");
        assert_eq!(referral_code("a@b@c"), "a_ref");
    }

    #[test]
    fn test_register_stores_zero_commission() {
        let affiliates = Affiliates::in_memory();
        let affiliate = affiliates.register("alice@x.com").unwrap();
        assert_eq!(affiliate.code, "alice_ref");
        assert!(affiliate.commission.abs() < f64::EPSILON);

        let stored = affiliates.lookup("alice_ref").unwrap().unwrap();
        assert_eq!(stored.email, "alice@x.com");
        assert!(stored.commission.abs() < f64::EPSILON);
    }

    #[test]
    fn test_reregister_overwrites_commission() {
        let store = Arc::new(MemoryAffiliateStore::new());
        let mut earner = Affiliate::new("alice@x.com");
        earner.commission = 12.5;
        store.save(&earner).unwrap();

        let affiliates = Affiliates::new(store);
        affiliates.register("alice@x.com").unwrap();

        let stored = affiliates.lookup("alice_ref").unwrap().unwrap();
        assert!(stored.commission.abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_local_part_shares_code() {
        let affiliates = Affiliates::in_memory();
        affiliates.register("sam@one.com").unwrap();
        affiliates.register("sam@two.com").unwrap();

        let stored = affiliates.lookup("sam_ref").unwrap().unwrap();
        assert_eq!(stored.email, "sam@two.com");
    }
}
