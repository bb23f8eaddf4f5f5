//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `PRICING_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 1000)
//! - `PRICING_FLAT_SHIPPING_FEE` - Flat shipping fee below the threshold (default: 49.99)
//! - `PRICING_TAX_RATE` - Flat tax rate applied to subtotal + shipping (default: 0.08)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Pricing rules for checkout totals
    pub pricing: PricingConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Pricing rules applied at checkout.
///
/// Shipping is waived only when the subtotal strictly exceeds the
/// free-shipping threshold; the tax rate applies to subtotal + shipping.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Subtotal above which shipping is free (exclusive boundary).
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged below the threshold.
    pub flat_shipping_fee: Decimal,
    /// Flat tax rate (e.g. 0.08 for 8%).
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(1000, 0),
            flat_shipping_fee: Decimal::new(4999, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = required("DATABASE_URL")?;
        let base_url = required("STOREFRONT_BASE_URL")?;

        let host: IpAddr = parse_optional("STOREFRONT_HOST", "127.0.0.1")?;
        let port: u16 = parse_optional("STOREFRONT_PORT", "3000")?;

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            base_url,
            pricing: pricing_from_env()?,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Load pricing rules, falling back to the defaults for unset variables.
fn pricing_from_env() -> Result<PricingConfig, ConfigError> {
    let defaults = PricingConfig::default();
    Ok(PricingConfig {
        free_shipping_threshold: parse_decimal(
            "PRICING_FREE_SHIPPING_THRESHOLD",
            defaults.free_shipping_threshold,
        )?,
        flat_shipping_fee: parse_decimal("PRICING_FLAT_SHIPPING_FEE", defaults.flat_shipping_fee)?,
        tax_rate: parse_decimal("PRICING_TAX_RATE", defaults.tax_rate)?,
    })
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_optional<T: std::str::FromStr>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_owned());
    raw.parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
}

fn parse_decimal(name: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: rust_decimal::Error| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_defaults() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.free_shipping_threshold, Decimal::new(1000, 0));
        assert_eq!(pricing.flat_shipping_fee, Decimal::new(4999, 2));
        assert_eq!(pricing.tax_rate, Decimal::new(8, 2));
    }
}
