//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `ORDER_STORE_NAME` - Store name in order messages (default: Art Haus)
//! - `ORDER_WHATSAPP_NUMBER` - Number orders are sent to (default: +96170073526)
//! - `ORDER_REDIRECT_BASE` - Messaging deep-link base (default: https://wa.me)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use art_haus_core::order::{DEFAULT_BUSINESS_NUMBER, DEFAULT_REDIRECT_BASE, DEFAULT_STORE_NAME};
use art_haus_core::{BusinessNumber, OrderComposer};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Order messaging configuration
    pub order: OrderConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Where and how orders are sent.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// Store name used in the message greeting
    pub store_name: String,
    /// Messaging number, digits only
    pub business_number: BusinessNumber,
    /// Messaging deep-link base URL
    pub redirect_base: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get_or("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string()))?;
        let port = get_or("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string()))?;
        let base_url = get_or("STOREFRONT_BASE_URL", "http://localhost:3000");

        let business_number = BusinessNumber::parse(&get_or(
            "ORDER_WHATSAPP_NUMBER",
            DEFAULT_BUSINESS_NUMBER,
        ))
        .map_err(|e| {
            ConfigError::InvalidEnvVar("ORDER_WHATSAPP_NUMBER".to_string(), e.to_string())
        })?;
        let redirect_base = Url::parse(&get_or("ORDER_REDIRECT_BASE", DEFAULT_REDIRECT_BASE))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORDER_REDIRECT_BASE".to_string(), e.to_string())
            })?
            .to_string();

        Ok(Self {
            host,
            port,
            base_url,
            order: OrderConfig {
                store_name: get_or("ORDER_STORE_NAME", DEFAULT_STORE_NAME),
                business_number,
                redirect_base,
            },
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            order: OrderConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl OrderConfig {
    /// Build the order composer for this configuration.
    #[must_use]
    pub fn composer(&self) -> OrderComposer {
        OrderComposer::new(
            self.store_name.clone(),
            self.business_number.clone(),
            &self.redirect_base,
        )
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            business_number: BusinessNumber::default(),
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.order.store_name, "Art Haus");
        assert_eq!(config.order.business_number.as_str(), "96170073526");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("ORDER_STORE_NAME", "Noir Atelier"),
            ("ORDER_WHATSAPP_NUMBER", "+1 (555) 010-0000"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.order.business_number.as_str(), "15550100000");

        let composer = config.order.composer();
        assert_eq!(
            composer.build_redirect_url("hi"),
            "https://wa.me/15550100000?text=hi"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_number_without_digits() {
        let err = load(&[("ORDER_WHATSAPP_NUMBER", "call us")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDER_WHATSAPP_NUMBER"));
    }

    #[test]
    fn test_invalid_redirect_base() {
        let err = load(&[("ORDER_REDIRECT_BASE", "wa dot me")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDER_REDIRECT_BASE"));
    }

    #[test]
    fn test_default_matches_empty_environment() {
        let from_env = load(&[]).unwrap();
        let default = StorefrontConfig::default();
        assert_eq!(from_env.socket_addr(), default.socket_addr());
        assert_eq!(
            from_env.order.composer().build_redirect_url("x"),
            default.order.composer().build_redirect_url("x")
        );
    }
}
