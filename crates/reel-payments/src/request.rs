//! Provider-agnostic payment request

use serde::{Deserialize, Serialize};

/// What every payment endpoint accepts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in major units (e.g. 9.99)
    pub amount: f64,

    /// ISO 4217 code, any case
    pub currency: String,

    /// Customer email; also the account key
    pub email: String,
}

impl PaymentRequest {
    /// Amount in minor units (cents, kobo), rounded to the nearest unit
    #[allow(clippy::cast_possible_truncation)]
    pub fn minor_units(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    pub fn currency_lowercase(&self) -> String {
        self.currency.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: f64) -> PaymentRequest {
        PaymentRequest {
            amount,
            currency: " USD ".into(),
            email: "alice@x.com".into(),
        }
    }

    #[test]
    fn test_minor_units_rounds_float_noise() {
        // 19.99 * 100 is 1998.9999999999998 in f64
        assert_eq!(request(19.99).minor_units(), 1999);
        assert_eq!(request(10.0).minor_units(), 1000);
        assert_eq!(request(0.5).minor_units(), 50);
    }

    #[test]
    fn test_currency_lowercase() {
        assert_eq!(request(1.0).currency_lowercase(), "usd");
    }
}
