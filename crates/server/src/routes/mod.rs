//! HTTP route handlers for the relay.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Service metadata and endpoint listing
//! GET  /health                            - Health check
//!
//! # Product creation
//! GET  /create-product/{price}            - Price only; title synthesized
//! GET  /create-product/{price}/{title}    - Price and title
//! GET  /create-product-full/{price}       - Query: title, image, description, vendor
//! POST /create-product                    - JSON body: price, title, description?, vendor?, imageUrl?
//! ```
//!
//! Every route answers CORS preflight requests from any origin.

pub mod products;

use axum::{
    Json, Router,
    extract::State,
    http::Method,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::shopify::UpstreamStrategy;
use crate::state::AppState;

/// Create the product creation routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/create-product", post(products::create_from_body))
        .route("/create-product/{price}", get(products::create_from_price))
        .route(
            "/create-product/{price}/{title}",
            get(products::create_from_price_and_title),
        )
        .route(
            "/create-product-full/{price}",
            get(products::create_from_query),
        )
}

/// Create all routes for the relay.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(product_routes())
}

/// Build the full application: routes, CORS, request tracing, and state.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
pub async fn health() -> &'static str {
    "ok"
}

/// Service metadata returned from `/`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub strategy: UpstreamStrategy,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const ENDPOINTS: [(&str, &str, &str); 6] = [
    ("GET", "/health", "Health check"),
    (
        "GET",
        "/create-product/{price}",
        "Create a product with a synthesized title",
    ),
    (
        "GET",
        "/create-product/{price}/{title}",
        "Create a product with a title",
    ),
    (
        "GET",
        "/create-product-full/{price}?title=&image=&description=&vendor=",
        "Create a product with optional details",
    ),
    (
        "POST",
        "/create-product",
        "Create a product from a JSON body {price, title, description?, vendor?, imageUrl?}",
    ),
    ("GET", "/", "This listing"),
];

/// Describe the service and the active upstream strategy.
pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        strategy: state.creator().strategy(),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointInfo {
                method,
                path,
                description,
            })
            .collect(),
    })
}
