//! Upstream response conversion functions.
//!
//! Both API flavors end up as the same [`ProductCreationResult`]: `gid://` IDs,
//! prices with two decimal places, empty strings instead of nulls.

use std::str::FromStr;

use product_relay_core::{
    GidKind, Nodes, ProductCreationResult, ProductGid, ProductImage, ProductVariant,
    format_amount,
};
use rust_decimal::Decimal;

use super::UserError;
use super::queries::product_create;
use super::rest::{RestImage, RestProduct, RestVariant};

// =============================================================================
// GraphQL conversions
// =============================================================================

pub fn convert_graphql_product(
    product: product_create::ProductCreateProductCreateProduct,
) -> ProductCreationResult {
    ProductCreationResult {
        id: ProductGid::normalize(GidKind::Product, &product.id),
        title: product.title,
        handle: product.handle,
        description_html: product.description_html,
        vendor: product.vendor,
        images: product
            .images
            .nodes
            .into_iter()
            .map(|i| ProductImage {
                id: i.id.map(|id| ProductGid::normalize(GidKind::ProductImage, &id)),
                url: i.url,
                alt_text: i.alt_text,
            })
            .collect::<Vec<_>>()
            .into(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(|v| ProductVariant {
                id: ProductGid::normalize(GidKind::ProductVariant, &v.id),
                title: v.title,
                price: render_price(&v.price),
                sku: v.sku.unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .into(),
    }
}

pub fn convert_user_errors(
    errors: Vec<product_create::ProductCreateProductCreateUserErrors>,
) -> Vec<UserError> {
    errors
        .into_iter()
        .map(|e| UserError {
            field: e.field,
            message: e.message,
        })
        .collect()
}

// =============================================================================
// REST conversions
// =============================================================================

pub fn convert_rest_product(product: RestProduct) -> ProductCreationResult {
    // Prefer the GraphQL ID Shopify includes in REST payloads
    let id = product
        .admin_graphql_api_id
        .unwrap_or_else(|| product.id.to_string());

    ProductCreationResult {
        id: ProductGid::normalize(GidKind::Product, &id),
        title: product.title,
        handle: product.handle.unwrap_or_default(),
        description_html: product.body_html.unwrap_or_default(),
        vendor: product.vendor.unwrap_or_default(),
        images: convert_rest_images(product.images),
        variants: convert_rest_variants(product.variants),
    }
}

fn convert_rest_images(images: Vec<RestImage>) -> Nodes<ProductImage> {
    images
        .into_iter()
        .map(|i| ProductImage {
            id: i
                .id
                .map(|id| ProductGid::normalize(GidKind::ProductImage, &id.to_string())),
            url: i.src,
            alt_text: i.alt,
        })
        .collect::<Vec<_>>()
        .into()
}

fn convert_rest_variants(variants: Vec<RestVariant>) -> Nodes<ProductVariant> {
    variants
        .into_iter()
        .map(|v| {
            let id = v.admin_graphql_api_id.unwrap_or_else(|| v.id.to_string());
            ProductVariant {
                id: ProductGid::normalize(GidKind::ProductVariant, &id),
                title: v.title.unwrap_or_default(),
                price: render_price(&v.price),
                sku: v.sku.unwrap_or_default(),
            }
        })
        .collect::<Vec<_>>()
        .into()
}

// =============================================================================
// Helpers
// =============================================================================

/// Re-render a decimal price string with two decimal places; non-numeric
/// values are passed through untouched.
fn render_price(raw: &str) -> String {
    Decimal::from_str(raw.trim()).map_or_else(|_| raw.to_string(), format_amount)
}
