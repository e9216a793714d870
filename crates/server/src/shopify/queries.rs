//! GraphQL operation definitions for the Shopify Admin API.
//!
//! Implements `graphql_client::GraphQLQuery` by hand, laid out the way the
//! derive macro would generate it. Only `productCreate` is needed, so no
//! Admin schema file is vendored.

use graphql_client::{GraphQLQuery, QueryBody};

/// Money amount as decimal string.
type Money = String;

/// HTML string.
#[allow(clippy::upper_case_acronyms)]
type HTML = String;

/// URL string.
#[allow(clippy::upper_case_acronyms)]
type URL = String;

// =============================================================================
// Product mutations
// =============================================================================

/// `productCreate` with a single variant.
pub struct ProductCreate;

pub mod product_create {
    #![allow(clippy::upper_case_acronyms, non_camel_case_types)]

    use serde::{Deserialize, Serialize};

    use super::{HTML, Money, URL};

    pub const OPERATION_NAME: &str = "ProductCreate";
    pub const QUERY: &str = r"mutation ProductCreate($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      handle
      descriptionHtml
      vendor
      images(first: 10) {
        nodes {
          id
          url
          altText
        }
      }
      variants(first: 10) {
        nodes {
          id
          title
          price
          sku
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum ProductVariantInventoryPolicy {
        DENY,
        CONTINUE,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum ProductVariantInventoryManagement {
        SHOPIFY,
        NOT_MANAGED,
        FULFILLMENT_SERVICE,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariantInput {
        pub price: Money,
        pub inventory_policy: ProductVariantInventoryPolicy,
        pub inventory_management: ProductVariantInventoryManagement,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductInput {
        pub title: String,
        pub description_html: HTML,
        pub vendor: String,
        pub variants: Vec<ProductVariantInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: ProductInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "productCreate")]
        pub product_create: Option<ProductCreateProductCreate>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreate {
        pub product: Option<ProductCreateProductCreateProduct>,
        #[serde(rename = "userErrors")]
        pub user_errors: Vec<ProductCreateProductCreateUserErrors>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateProduct {
        pub id: String,
        pub title: String,
        pub handle: String,
        #[serde(rename = "descriptionHtml")]
        pub description_html: HTML,
        pub vendor: String,
        pub images: ProductCreateProductCreateProductImages,
        pub variants: ProductCreateProductCreateProductVariants,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateProductImages {
        pub nodes: Vec<ProductCreateProductCreateProductImagesNodes>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateProductImagesNodes {
        pub id: Option<String>,
        pub url: URL,
        #[serde(rename = "altText")]
        pub alt_text: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateProductVariants {
        pub nodes: Vec<ProductCreateProductCreateProductVariantsNodes>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateProductVariantsNodes {
        pub id: String,
        pub title: String,
        pub price: Money,
        pub sku: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCreateProductCreateUserErrors {
        pub field: Option<Vec<String>>,
        pub message: String,
    }
}

impl GraphQLQuery for ProductCreate {
    type Variables = product_create::Variables;
    type ResponseData = product_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_create::QUERY,
            operation_name: product_create::OPERATION_NAME,
        }
    }
}
