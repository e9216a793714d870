//! Uniform product result returned to callers.
//!
//! Both upstream strategies are converted into these types, so callers never
//! see which API produced a product.

use serde::{Deserialize, Serialize};

use super::gid::ProductGid;

/// GraphQL-style connection wrapper (`{ "nodes": [...] }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Nodes<T> {
    /// Number of nodes in the connection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the connection has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Nodes<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self { nodes }
    }
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Image global ID, when the upstream assigned one.
    pub id: Option<ProductGid>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant global ID.
    pub id: ProductGid,
    /// Variant title (`"Default Title"` for single-variant products).
    pub title: String,
    /// Price with two decimal places.
    pub price: String,
    /// SKU code, empty when unset.
    pub sku: String,
}

/// A newly created product, normalized across upstream strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreationResult {
    /// Product global ID.
    pub id: ProductGid,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// HTML description.
    pub description_html: String,
    /// Vendor name.
    pub vendor: String,
    /// Attached images.
    pub images: Nodes<ProductImage>,
    /// Product variants.
    pub variants: Nodes<ProductVariant>,
}
