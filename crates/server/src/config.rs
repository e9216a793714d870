//! Relay configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_SHOP` - Shop name or domain (e.g., `your-store` or `your-store.myshopify.com`)
//! - `SHOPIFY_API_KEY` - Private app API key
//! - `SHOPIFY_API_SECRET` - Private app password (HIGH PRIVILEGE)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-01)
//! - `SHOPIFY_API_STRATEGY` - `graphql` or `rest` (default: graphql)
//! - `SHOPIFY_ADMIN_BASE_URL` - Override the upstream origin (e.g., a local fake)
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: none)
//! - `RELAY_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` / `RELAY_PORT` - Listen port (default: 3000)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::shopify::UpstreamStrategy;

const DEFAULT_API_VERSION: &str = "2024-01";
const MYSHOPIFY_DOMAIN: &str = "myshopify.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Relay application configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyConfig,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Passed to the upstream adapter at construction. Implements `Debug`
/// manually to redact the API secret.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shop domain (e.g., your-store.myshopify.com)
    pub shop: String,
    /// Private app API key
    pub api_key: String,
    /// Private app password (HIGH PRIVILEGE - full product access)
    pub api_secret: SecretString,
    /// Admin API version (e.g., 2024-01)
    pub api_version: String,
    /// Which upstream API flavor this deployment uses
    pub strategy: UpstreamStrategy,
    /// Origin override; `https://{shop}/` when unset
    pub base_url: Option<Url>,
    /// Upstream request timeout; requests wait indefinitely when unset
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("shop", &self.shop)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("strategy", &self.strategy)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ShopifyConfig {
    /// Create a configuration with default version, strategy and no timeout.
    #[must_use]
    pub fn new(shop: &str, api_key: impl Into<String>, api_secret: SecretString) -> Self {
        Self {
            shop: normalize_shop_domain(shop),
            api_key: api_key.into(),
            api_secret,
            api_version: DEFAULT_API_VERSION.to_string(),
            strategy: UpstreamStrategy::default(),
            base_url: None,
            request_timeout: None,
        }
    }

    /// Use the given upstream strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: UpstreamStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Send upstream requests to `base_url` instead of the shop domain.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Abort upstream requests after `timeout`.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Root of the versioned Admin API, ending in a slash
    /// (e.g., `https://shop.myshopify.com/admin/api/2024-01/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the shop domain or base URL cannot form a URL.
    pub fn api_root(&self) -> Result<Url, url::ParseError> {
        let origin = match &self.base_url {
            Some(url) => url.clone(),
            None => Url::parse(&format!("https://{}/", self.shop))?,
        };
        origin.join(&format!("admin/api/{}/", self.api_version))
    }

    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shop = get_required(vars, "SHOPIFY_SHOP")?;
        let api_key = get_required(vars, "SHOPIFY_API_KEY")?;
        let api_secret = SecretString::from(get_required(vars, "SHOPIFY_API_SECRET")?);

        let mut config = Self::new(&shop, api_key, api_secret);

        if let Some(version) = vars("SHOPIFY_API_VERSION") {
            config.api_version = version;
        }

        if let Some(strategy) = vars("SHOPIFY_API_STRATEGY") {
            config.strategy = strategy
                .parse()
                .map_err(|e: String| invalid("SHOPIFY_API_STRATEGY", e))?;
        }

        if let Some(base_url) = vars("SHOPIFY_ADMIN_BASE_URL") {
            let url = Url::parse(&base_url)
                .map_err(|e| invalid("SHOPIFY_ADMIN_BASE_URL", e.to_string()))?;
            config.base_url = Some(url);
        }

        if let Some(secs) = vars("SHOPIFY_REQUEST_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|e| invalid("SHOPIFY_REQUEST_TIMEOUT_SECS", e.to_string()))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config
            .api_root()
            .map_err(|e| invalid("SHOPIFY_SHOP", e.to_string()))?;

        Ok(config)
    }
}

impl RelayConfig {
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

        Self::from_vars(&|key| std::env::var(key).ok())
    }

    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(vars, "RELAY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| invalid("RELAY_HOST", e.to_string()))?;

        // PORT is set by most hosting platforms and wins over RELAY_PORT
        let (port_var, port) = vars("PORT").map_or_else(
            || ("RELAY_PORT", get_or_default(vars, "RELAY_PORT", "3000")),
            |port| ("PORT", port),
        );
        let port = port
            .parse::<u16>()
            .map_err(|e| invalid(port_var, e.to_string()))?;

        let shopify = ShopifyConfig::from_vars(vars)?;
        let json_logs = vars("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let sentry_dsn = vars("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = vars("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            shopify,
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable; empty values count as missing.
fn get_required(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    vars(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.into())
}

/// Turn `my-store`, `my-store.myshopify.com` or `https://my-store.myshopify.com/`
/// into a bare domain.
fn normalize_shop_domain(shop: &str) -> String {
    let domain = shop
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    if domain.contains('.') {
        domain.to_string()
    } else {
        format!("{domain}.{MYSHOPIFY_DOMAIN}")
    }
}
