//! Shopify Admin API product creation (HIGH PRIVILEGE credentials).
//!
//! # Architecture
//!
//! - [`UpstreamProductCreator`] is the single seam between HTTP handlers and
//!   Shopify. Exactly one implementation is built at startup from
//!   [`ShopifyConfig::strategy`]:
//!   - [`GraphqlProductCreator`] - `productCreate` mutation, inline `userErrors`
//!   - [`RestProductCreator`] - `POST products.json`, flat resource response
//! - Both convert their wire shapes into
//!   [`ProductCreationResult`] in `conversions`, so callers never see which
//!   API produced a product.
//! - One upstream call per request. No retries, no rate limiting.
//!
//! # Example
//!
//! ```rust,ignore
//! use product_relay_server::shopify::creator_from_config;
//!
//! let creator = creator_from_config(&config.shopify)?;
//! let product = creator.create_product(&request).await?;
//! ```

mod conversions;
mod graphql;
mod http;
pub mod queries;
mod rest;

pub use graphql::GraphqlProductCreator;
pub use rest::RestProductCreator;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use product_relay_core::{ProductCreationRequest, ProductCreationResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShopifyConfig;

/// Which flavor of the Admin API a deployment talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamStrategy {
    /// GraphQL `productCreate` mutation.
    #[default]
    Graphql,
    /// REST `products.json` resource.
    Rest,
}

impl UpstreamStrategy {
    /// Lowercase name, as accepted by `SHOPIFY_API_STRATEGY`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Graphql => "graphql",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for UpstreamStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpstreamStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphql" | "gql" => Ok(Self::Graphql),
            "rest" => Ok(Self::Rest),
            other => Err(format!("expected `graphql` or `rest`, got `{other}`")),
        }
    }
}

/// Creates products in the upstream store.
///
/// Implementations issue exactly one upstream call per invocation and hold no
/// per-request state.
#[async_trait]
pub trait UpstreamProductCreator: Send + Sync {
    /// The API flavor this creator talks to.
    fn strategy(&self) -> UpstreamStrategy;

    /// Create a product from a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::UserErrors`] when Shopify rejects the input
    /// field by field, and another [`UpstreamError`] variant for transport,
    /// authentication, or response-shape failures.
    async fn create_product(
        &self,
        request: &ProductCreationRequest,
    ) -> Result<ProductCreationResult, UpstreamError>;
}

/// Build the creator selected by `config.strategy`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the configured
/// shop domain does not form a valid URL.
pub fn creator_from_config(
    config: &ShopifyConfig,
) -> Result<Box<dyn UpstreamProductCreator>, UpstreamError> {
    let creator: Box<dyn UpstreamProductCreator> = match config.strategy {
        UpstreamStrategy::Graphql => Box::new(GraphqlProductCreator::new(config)?),
        UpstreamStrategy::Rest => Box::new(RestProductCreator::new(config)?),
    };
    tracing::info!(strategy = %config.strategy, shop = %config.shop, "Upstream product creator ready");
    Ok(creator)
}

/// Errors that can occur when creating a product upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream endpoint could not be built.
    #[error("Invalid upstream endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Upstream answered with an unexpected status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as received.
        body: String,
    },

    /// GraphQL query returned top-level errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Field-level errors reported by the `productCreate` mutation.
    #[error("User errors: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// Upstream accepted the call but returned no product.
    #[error("No product returned from create")]
    MissingProduct,
}

/// A field-level error from a Shopify mutation, echoed verbatim to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field (e.g., `["title"]`).
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            format!("{}: {}", field, e.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
