//! Product creation route handlers.
//!
//! Each entry point only extracts raw fields; validation and defaults live in
//! [`product_relay_core::normalize`], and the upstream call goes through the
//! creator held in [`AppState`].

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use product_relay_core::{EntryPoint, ProductCreationResult, RawProductInput, normalize};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for `GET /create-product-full/{price}`.
#[derive(Debug, Default, Deserialize)]
pub struct FullQuery {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
}

/// JSON body for `POST /create-product`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub price: Option<PriceField>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    #[serde(alias = "image_url")]
    pub image_url: Option<String>,
}

/// A price sent either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

impl PriceField {
    fn into_raw(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub success: bool,
    pub product: ProductCreationResult,
    pub message: String,
}

/// Path segments that are not valid UTF-8 get the same JSON envelope as
/// every other rejected request.
fn path_segments<T>(path: std::result::Result<Path<T>, PathRejection>) -> Result<T> {
    path.map(|Path(segments)| segments)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// `GET /create-product/{price}`
pub async fn create_from_price(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ProductCreatedResponse>> {
    let price = path_segments(path)?;
    let input = RawProductInput {
        price: Some(price),
        ..Default::default()
    };
    create(&state, EntryPoint::PriceOnly, input).await
}

/// `GET /create-product/{price}/{title}`
pub async fn create_from_price_and_title(
    State(state): State<AppState>,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<ProductCreatedResponse>> {
    let (price, title) = path_segments(path)?;
    let input = RawProductInput {
        price: Some(price),
        title: Some(title),
        ..Default::default()
    };
    create(&state, EntryPoint::PriceAndTitle, input).await
}

/// `GET /create-product-full/{price}?title=&image=&description=&vendor=`
pub async fn create_from_query(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<FullQuery>, QueryRejection>,
) -> Result<Json<ProductCreatedResponse>> {
    let price = path_segments(path)?;
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let input = RawProductInput {
        price: Some(price),
        title: query.title,
        description: query.description,
        vendor: query.vendor,
        image_url: query.image,
    };
    create(&state, EntryPoint::FullQuery, input).await
}

/// `POST /create-product`
pub async fn create_from_body(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateProductBody>, JsonRejection>,
) -> Result<Json<ProductCreatedResponse>> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let input = RawProductInput {
        price: body.price.map(PriceField::into_raw),
        title: body.title,
        description: body.description,
        vendor: body.vendor,
        image_url: body.image_url,
    };
    create(&state, EntryPoint::JsonBody, input).await
}

/// Validate, create upstream, and wrap the result.
#[instrument(skip(state, input))]
async fn create(
    state: &AppState,
    entry: EntryPoint,
    input: RawProductInput,
) -> Result<Json<ProductCreatedResponse>> {
    let request = normalize(entry, input)?;
    let product = state.creator().create_product(&request).await?;

    tracing::info!(product_id = %product.id, title = %product.title, "Product created");

    Ok(Json(ProductCreatedResponse {
        success: true,
        message: request.success_message(),
        product,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use product_relay_core::{
        GidKind, Nodes, ProductCreationRequest, ProductGid, ProductImage, ProductVariant,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::app;
    use crate::shopify::{UpstreamError, UpstreamProductCreator, UpstreamStrategy, UserError};

    /// What the fake upstream answers with.
    pub enum Reply {
        /// Echo the request back as a created product.
        Echo,
        UserErrors(Vec<UserError>),
        Status(u16),
    }

    /// In-process stand-in for an upstream creator that counts its calls.
    pub struct FakeCreator {
        calls: Arc<AtomicU64>,
        reply: Reply,
    }

    #[derive(Clone)]
    pub struct Calls(Arc<AtomicU64>);

    impl Calls {
        pub fn calls(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl FakeCreator {
        pub fn state() -> (AppState, Calls) {
            Self::with_reply(Reply::Echo)
        }

        pub fn with_reply(reply: Reply) -> (AppState, Calls) {
            let calls = Arc::new(AtomicU64::new(0));
            let creator = Self {
                calls: Arc::clone(&calls),
                reply,
            };
            (AppState::new(Box::new(creator)), Calls(calls))
        }
    }

    fn echo(request: &ProductCreationRequest) -> ProductCreationResult {
        ProductCreationResult {
            id: ProductGid::normalize(GidKind::Product, "1"),
            title: request.title.clone(),
            handle: request.title.to_lowercase().replace(' ', "-"),
            description_html: request.description.clone(),
            vendor: request.vendor.clone(),
            images: request
                .image_url()
                .map(|url| ProductImage {
                    id: Some(ProductGid::normalize(GidKind::ProductImage, "2")),
                    url: url.to_string(),
                    alt_text: None,
                })
                .into_iter()
                .collect::<Vec<_>>()
                .into(),
            variants: Nodes::from(vec![ProductVariant {
                id: ProductGid::normalize(GidKind::ProductVariant, "3"),
                title: "Default Title".to_string(),
                price: request.price.formatted(),
                sku: String::new(),
            }]),
        }
    }

    #[async_trait]
    impl UpstreamProductCreator for FakeCreator {
        fn strategy(&self) -> UpstreamStrategy {
            UpstreamStrategy::Graphql
        }

        async fn create_product(
            &self,
            request: &ProductCreationRequest,
        ) -> std::result::Result<ProductCreationResult, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Echo => Ok(echo(request)),
                Reply::UserErrors(errors) => Err(UpstreamError::UserErrors(errors.clone())),
                Reply::Status(status) => Err(UpstreamError::Status {
                    status: *status,
                    body: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::post("/create-product")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_price_only_synthesizes_title() {
        let (state, calls) = FakeCreator::state();
        let (status, body) = send(app(state), get("/create-product/19.9")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["product"]["title"], "Product - $19.90");
        assert!(
            body["product"]["descriptionHtml"]
                .as_str()
                .unwrap()
                .contains("$19.90")
        );
        assert_eq!(body["product"]["variants"]["nodes"][0]["price"], "19.90");
        assert_eq!(
            body["message"],
            "Product created successfully with price $19.90"
        );
        assert_eq!(calls.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_prices_never_reach_upstream() {
        let uris = [
            "/create-product/0",
            "/create-product/-1",
            "/create-product/abc",
            "/create-product/0/Hat",
            "/create-product-full/-5?title=Hat",
            "/create-product-full/free",
        ];

        for uri in uris {
            let (state, calls) = FakeCreator::state();
            let (status, body) = send(app(state), get(uri)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Invalid price. Price must be a positive number.");
            assert_eq!(calls.calls(), 0, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_percent_encoded_title_is_decoded_once() {
        let (state, _) = FakeCreator::state();
        let (status, body) = send(app(state), get("/create-product/5/Blue%20Hat%20%2525")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["title"], "Blue Hat %25");
        assert_eq!(
            body["product"]["descriptionHtml"],
            "<p>Blue Hat %25 is available for $5.00.</p>"
        );
        assert_eq!(
            body["message"],
            "Product \"Blue Hat %25\" created successfully with price $5.00"
        );
    }

    #[tokio::test]
    async fn test_full_query_passes_optional_fields() {
        let (state, _) = FakeCreator::state();
        let (status, body) = send(
            app(state),
            get("/create-product-full/5?title=Poster&image=http://x/y.jpg&vendor=Acme"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["title"], "Poster");
        assert_eq!(body["product"]["vendor"], "Acme");
        assert_eq!(body["product"]["images"]["nodes"][0]["url"], "http://x/y.jpg");
    }

    #[tokio::test]
    async fn test_full_query_without_title_synthesizes_one() {
        let (state, _) = FakeCreator::state();
        let (status, body) = send(app(state), get("/create-product-full/7.5")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["title"], "Product - $7.50");
        assert!(body["product"]["images"]["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_requires_title() {
        let (state, calls) = FakeCreator::state();
        let (status, body) = send(app(state), post_json(&json!({ "price": "10", "title": "" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required.");
        assert_eq!(calls.calls(), 0);
    }

    #[tokio::test]
    async fn test_post_accepts_numeric_price_and_image_url() {
        let (state, calls) = FakeCreator::state();
        let (status, body) = send(
            app(state),
            post_json(&json!({
                "price": 12.5,
                "title": "  Mug  ",
                "imageUrl": "http://x/mug.jpg"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["title"], "Mug");
        assert_eq!(body["product"]["variants"]["nodes"][0]["price"], "12.50");
        assert_eq!(body["product"]["images"]["nodes"][0]["url"], "http://x/mug.jpg");
        assert_eq!(
            body["message"],
            "Product \"Mug\" created successfully with price $12.50"
        );
        assert_eq!(calls.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (state, calls) = FakeCreator::state();
        let request = Request::post("/create-product")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"price\": "))
            .unwrap();
        let (status, body) = send(app(state), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request");
        assert!(body["details"].is_string());
        assert_eq!(calls.calls(), 0);
    }

    #[tokio::test]
    async fn test_user_errors_are_400_with_details() {
        let errors = vec![UserError {
            field: Some(vec!["title".to_string()]),
            message: "Title can't be blank".to_string(),
        }];
        let (state, calls) = FakeCreator::with_reply(Reply::UserErrors(errors));
        let (status, body) = send(app(state), get("/create-product/5")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["details"],
            json!([{ "field": ["title"], "message": "Title can't be blank" }])
        );
        assert_eq!(calls.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let (state, _) = FakeCreator::with_reply(Reply::Status(503));
        let (status, body) = send(app(state), post_json(&json!({ "price": "5", "title": "Hat" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create product");
        assert_eq!(
            body["details"],
            "Upstream returned HTTP 503: upstream unavailable"
        );
    }

    #[tokio::test]
    async fn test_non_utf8_path_segments_get_json_envelope() {
        for uri in [
            "/create-product/%FF",
            "/create-product/5/%FF%FE",
            "/create-product-full/%FF?title=Hat",
        ] {
            let (state, calls) = FakeCreator::state();
            let response = app(state).oneshot(get(uri)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json",
                "{uri}"
            );
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"], "Invalid request", "{uri}");
            assert!(body["details"].as_str().unwrap().contains("UTF-8"), "{uri}");
            assert_eq!(calls.calls(), 0, "{uri}");
        }
    }

    #[test]
    fn test_price_field_accepts_string_or_number() {
        let body: CreateProductBody =
            serde_json::from_value(json!({ "price": 10, "title": "Hat", "image_url": "u" })).unwrap();
        assert_eq!(body.price.unwrap().into_raw(), "10");
        assert_eq!(body.image_url.as_deref(), Some("u"));

        let body: CreateProductBody = serde_json::from_value(json!({ "price": "9.99" })).unwrap();
        assert_eq!(body.price, Some(PriceField::Text("9.99".to_string())));
    }
}
