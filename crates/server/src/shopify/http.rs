//! Authenticated HTTP access to the versioned Admin API.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::UpstreamError;
use crate::config::ShopifyConfig;

/// Retry-After fallback when Shopify omits the header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Shared HTTP plumbing for both creators.
///
/// Cheaply cloneable; the `reqwest::Client` connection pool is shared.
#[derive(Clone)]
pub(super) struct AdminHttp {
    inner: Arc<AdminHttpInner>,
}

struct AdminHttpInner {
    client: reqwest::Client,
    api_root: Url,
    api_key: String,
    api_secret: SecretString,
}

impl AdminHttp {
    pub(super) fn new(config: &ShopifyConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(AdminHttpInner {
                client: builder.build()?,
                api_root: config.api_root()?,
                api_key: config.api_key.clone(),
                api_secret: config.api_secret.clone(),
            }),
        })
    }

    /// Resolve a resource path (e.g., `graphql.json`) against the API root.
    pub(super) fn endpoint(&self, resource: &str) -> Result<Url, UpstreamError> {
        Ok(self.inner.api_root.join(resource)?)
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Authenticates with the private app key and password (HTTP basic).
    pub(super) async fn post_json<B, T>(&self, resource: &str, body: &B) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = self.endpoint(resource)?;

        let response = self
            .inner
            .client
            .post(endpoint)
            .basic_auth(
                &self.inner.api_key,
                Some(self.inner.api_secret.expose_secret()),
            )
            .json(body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map_or(DEFAULT_RETRY_AFTER_SECS, whole_seconds);
            return Err(UpstreamError::RateLimited(retry_after));
        }

        // Check for bad credentials
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Unauthorized(format!(
                "{status}: {}",
                text.trim()
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Round a fractional Retry-After value (Shopify sends e.g. `2.0`) up to whole seconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to >= 0
fn whole_seconds(secs: f64) -> u64 {
    secs.ceil().max(0.0) as u64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_api_root() {
        let config = ShopifyConfig::new("demo", "key", SecretString::from("secret"));
        let http = AdminHttp::new(&config).unwrap();

        assert_eq!(
            http.endpoint("graphql.json").unwrap().as_str(),
            "https://demo.myshopify.com/admin/api/2024-01/graphql.json"
        );
        assert_eq!(
            http.endpoint("products.json").unwrap().as_str(),
            "https://demo.myshopify.com/admin/api/2024-01/products.json"
        );
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(2.0), 2);
        assert_eq!(whole_seconds(0.4), 1);
        assert_eq!(whole_seconds(-3.0), 0);
    }

    #[test]
    fn test_admin_http_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<AdminHttp>();
    }
}
