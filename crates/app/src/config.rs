//! Checkout configuration loaded from environment variables.

/// Gateway identity and currency, with placeholder defaults.
///
/// Reads from environment variables:
/// - `MERCHANT_KEY` — gateway public key
/// - `PAYER_EMAIL` — email attached to payment sessions
/// - `CURRENCY` — ISO currency code (default `"NGN"`; the gateway bills in
///   minor units of this currency)
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub merchant_key: String,
    pub payer_email: String,
    pub currency: String,
}

impl CheckoutConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            merchant_key: std::env::var("MERCHANT_KEY").unwrap_or(defaults.merchant_key),
            payer_email: std::env::var("PAYER_EMAIL").unwrap_or(defaults.payer_email),
            currency: std::env::var("CURRENCY").unwrap_or(defaults.currency),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            merchant_key: "pk_test_placeholder".to_string(),
            payer_email: "payments@example.com".to_string(),
            currency: "NGN".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CheckoutConfig::default();
        assert_eq!(config.merchant_key, "pk_test_placeholder");
        assert_eq!(config.payer_email, "payments@example.com");
        assert_eq!(config.currency, "NGN");
    }
}
