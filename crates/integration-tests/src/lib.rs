//! Integration tests for Product Relay.
//!
//! Each test starts a fake Shopify Admin API and a relay pointed at it, both
//! on ephemeral localhost ports, then drives the relay over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-relay-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `graphql_strategy` - `productCreate` mutation flow
//! - `rest_strategy` - `products.json` resource flow
//! - `validation` - rejected input never reaches Shopify

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use product_relay_server::{
    config::ShopifyConfig, routes, shopify::UpstreamStrategy, state::AppState,
};
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_API_SECRET: &str = "test-secret";

/// A request received by [`FakeShopify`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// What [`FakeShopify`] answers every request with.
#[derive(Debug, Clone)]
pub struct CannedReply {
    status: StatusCode,
    headers: HeaderMap,
    delay: Option<Duration>,
    body: Value,
}

impl CannedReply {
    /// `200` with a JSON body.
    #[must_use]
    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            delay: None,
            body,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    /// Hold the response back for `delay` after recording the request.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct FakeState {
    reply: CannedReply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Fake Shopify Admin API that records every request and answers each one
/// with the same canned status and JSON body.
pub struct FakeShopify {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeShopify {
    /// Start a fake answering `200` with `reply`.
    pub async fn start(reply: Value) -> Self {
        Self::start_with_status(StatusCode::OK, reply).await
    }

    /// Start a fake answering `status` with `reply`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_with_status(status: StatusCode, reply: Value) -> Self {
        Self::start_with(CannedReply::json(reply).with_status(status)).await
    }

    /// Start a fake answering with `reply`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_with(reply: CannedReply) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            reply,
            calls: Arc::clone(&calls),
        };

        let app = Router::new().fallback(record).with_state(state);
        let addr = serve(app).await;

        Self { addr, calls }
    }

    /// Origin to use as `SHOPIFY_ADMIN_BASE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("fake Shopify URL")
    }

    /// Requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn record(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let call = RecordedCall {
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state
        .calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(call);

    let CannedReply {
        status,
        headers,
        delay,
        body,
    } = state.reply;

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    (status, headers, Json(body)).into_response()
}

/// Start a relay talking to `shopify` with the given strategy.
///
/// Returns the relay's base URL (no trailing slash).
///
/// # Panics
///
/// Panics if the upstream creator cannot be built or no port can be bound.
pub async fn spawn_relay(shopify: &FakeShopify, strategy: UpstreamStrategy) -> String {
    spawn_relay_with(shopify, strategy, |config| config).await
}

/// Like [`spawn_relay`], with a hook to adjust the Shopify configuration
/// (e.g., to set a request timeout).
///
/// # Panics
///
/// Panics if the upstream creator cannot be built or no port can be bound.
pub async fn spawn_relay_with(
    shopify: &FakeShopify,
    strategy: UpstreamStrategy,
    configure: impl FnOnce(ShopifyConfig) -> ShopifyConfig,
) -> String {
    let config = configure(
        ShopifyConfig::new(
            "test-shop",
            TEST_API_KEY,
            SecretString::from(TEST_API_SECRET),
        )
        .with_strategy(strategy)
        .with_base_url(shopify.base_url()),
    );

    let state = AppState::from_config(&config).expect("upstream creator");
    let addr = serve(routes::app(state)).await;
    format!("http://{addr}")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    addr
}
