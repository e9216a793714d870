//! Direct-resource product creation via `POST products.json`.
//!
//! The REST resource has no inline error list: anything other than a 2xx
//! response with a product body surfaces as an [`UpstreamError`].

use std::fmt;

use async_trait::async_trait;
use product_relay_core::{ProductCreationRequest, ProductCreationResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{
    UpstreamError, UpstreamProductCreator, UpstreamStrategy, conversions::convert_rest_product,
    http::AdminHttp,
};
use crate::config::ShopifyConfig;

/// Inventory policy sent for the single variant: keep selling when out of stock.
const INVENTORY_POLICY_CONTINUE: &str = "continue";

/// Shopify Admin REST product creator.
#[derive(Clone)]
pub struct RestProductCreator {
    http: AdminHttp,
}

impl RestProductCreator {
    /// Create a REST creator for the configured shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the shop domain
    /// does not form a valid URL.
    pub fn new(config: &ShopifyConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: AdminHttp::new(config)?,
        })
    }
}

#[async_trait]
impl UpstreamProductCreator for RestProductCreator {
    fn strategy(&self) -> UpstreamStrategy {
        UpstreamStrategy::Rest
    }

    #[instrument(skip(self, request), fields(title = %request.title, price = %request.price))]
    async fn create_product(
        &self,
        request: &ProductCreationRequest,
    ) -> Result<ProductCreationResult, UpstreamError> {
        let body = NewProductEnvelope::from_request(request);
        let created: CreatedProductEnvelope = self.http.post_json("products.json", &body).await?;
        Ok(convert_rest_product(created.product))
    }
}

// =============================================================================
// Request wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct NewProductEnvelope<'a> {
    product: NewProduct<'a>,
}

#[derive(Debug, Serialize)]
struct NewProduct<'a> {
    title: &'a str,
    body_html: &'a str,
    vendor: &'a str,
    variants: Vec<NewVariant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<NewImage<'a>>,
}

#[derive(Debug, Serialize)]
struct NewVariant {
    price: String,
    /// `null` disables inventory tracking.
    inventory_management: Option<&'static str>,
    inventory_policy: &'static str,
}

#[derive(Debug, Serialize)]
struct NewImage<'a> {
    src: &'a str,
}

impl<'a> NewProductEnvelope<'a> {
    fn from_request(request: &'a ProductCreationRequest) -> Self {
        Self {
            product: NewProduct {
                title: &request.title,
                body_html: &request.description,
                vendor: &request.vendor,
                variants: vec![NewVariant {
                    price: request.price.formatted(),
                    inventory_management: None,
                    inventory_policy: INVENTORY_POLICY_CONTINUE,
                }],
                images: request
                    .image_url()
                    .map(|src| NewImage { src })
                    .into_iter()
                    .collect(),
            },
        }
    }
}

// =============================================================================
// Response wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreatedProductEnvelope {
    product: RestProduct,
}

/// Numeric REST ID; tolerated as a string too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(super) enum RestId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RestProduct {
    pub id: RestId,
    pub admin_graphql_api_id: Option<String>,
    pub title: String,
    pub handle: Option<String>,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    #[serde(default)]
    pub images: Vec<RestImage>,
    #[serde(default)]
    pub variants: Vec<RestVariant>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestImage {
    pub id: Option<RestId>,
    pub src: String,
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RestVariant {
    pub id: RestId,
    pub admin_graphql_api_id: Option<String>,
    pub title: Option<String>,
    pub price: String,
    pub sku: Option<String>,
}
