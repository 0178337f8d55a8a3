//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WORDPRESS_SITE_URL` - Base URL of the order management site
//! - `WC_CONSUMER_KEY` - REST API consumer key
//! - `WC_CONSUMER_SECRET` - REST API consumer secret
//!
//! ## Optional
//! - `POSTAL_LOOKUP_URL` - Postal lookup service base URL
//!   (default: <https://api.postalpincode.in>)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default base URL for the postal lookup service.
pub const DEFAULT_POSTAL_LOOKUP_URL: &str = "https://api.postalpincode.in";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Checkout subsystem configuration.
///
/// Implements `Debug` manually to redact the API credentials.
#[derive(Clone)]
pub struct CheckoutConfig {
    /// Base URL of the order management site (the `wp-json/wc/v3` REST
    /// prefix is appended by the client).
    pub site_url: Url,
    /// REST API consumer key.
    pub consumer_key: SecretString,
    /// REST API consumer secret.
    pub consumer_secret: SecretString,
    /// Base URL of the postal lookup service.
    pub postal_lookup_url: String,
}

impl std::fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field("site_url", &self.site_url.as_str())
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("postal_lookup_url", &self.postal_lookup_url)
            .finish()
    }
}

impl CheckoutConfig {
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

        let site_url = get_required_env("WORDPRESS_SITE_URL")?;
        let site_url = Url::parse(&site_url).map_err(|e| {
            ConfigError::InvalidEnvVar("WORDPRESS_SITE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            site_url,
            consumer_key: get_required_secret("WC_CONSUMER_KEY")?,
            consumer_secret: get_required_secret("WC_CONSUMER_SECRET")?,
            postal_lookup_url: get_env_or_default("POSTAL_LOOKUP_URL", DEFAULT_POSTAL_LOOKUP_URL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
