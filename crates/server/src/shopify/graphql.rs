//! Mutation-style product creation via the GraphQL Admin API.
//!
//! `productCreate` reports invalid input inline as `userErrors`; those become
//! [`UpstreamError::UserErrors`] rather than transport failures.

use async_trait::async_trait;
use graphql_client::GraphQLQuery;
use product_relay_core::{ProductCreationRequest, ProductCreationResult};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use super::{
    GraphQLError, UpstreamError, UpstreamProductCreator, UpstreamStrategy,
    conversions::{convert_graphql_product, convert_user_errors},
    http::AdminHttp,
    queries::{
        ProductCreate,
        product_create::{
            ProductInput, ProductVariantInput, ProductVariantInventoryManagement,
            ProductVariantInventoryPolicy, Variables,
        },
    },
};
use crate::config::ShopifyConfig;

/// Shopify Admin GraphQL product creator.
#[derive(Clone)]
pub struct GraphqlProductCreator {
    http: AdminHttp,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

impl GraphqlProductCreator {
    /// Create a GraphQL creator for the configured shop.
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

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, UpstreamError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response: GraphQLResponse<Q::ResponseData> =
            self.http.post_json("graphql.json", &body).await?;

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    path: e.path,
                })
                .collect();
            return Err(UpstreamError::GraphQL(converted_errors));
        }

        response.data.ok_or_else(|| {
            UpstreamError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                path: vec![],
            }])
        })
    }
}

/// Build `productCreate` variables: one variant, tracked by Shopify, oversell denied.
fn product_create_variables(request: &ProductCreationRequest) -> Variables {
    Variables {
        input: ProductInput {
            title: request.title.clone(),
            description_html: request.description.clone(),
            vendor: request.vendor.clone(),
            variants: vec![ProductVariantInput {
                price: request.price.formatted(),
                inventory_policy: ProductVariantInventoryPolicy::DENY,
                inventory_management: ProductVariantInventoryManagement::SHOPIFY,
            }],
        },
    }
}

#[async_trait]
impl UpstreamProductCreator for GraphqlProductCreator {
    fn strategy(&self) -> UpstreamStrategy {
        UpstreamStrategy::Graphql
    }

    #[instrument(skip(self, request), fields(title = %request.title, price = %request.price))]
    async fn create_product(
        &self,
        request: &ProductCreationRequest,
    ) -> Result<ProductCreationResult, UpstreamError> {
        if request.image_url().is_some() {
            tracing::debug!("image_url is not attached by the GraphQL strategy");
        }

        let response = self
            .execute::<ProductCreate>(product_create_variables(request))
            .await?;

        let payload = response
            .product_create
            .ok_or(UpstreamError::MissingProduct)?;

        if !payload.user_errors.is_empty() {
            return Err(UpstreamError::UserErrors(convert_user_errors(
                payload.user_errors,
            )));
        }

        payload
            .product
            .map(convert_graphql_product)
            .ok_or(UpstreamError::MissingProduct)
    }
}
