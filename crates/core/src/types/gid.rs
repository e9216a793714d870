//! Shopify global identifiers.
//!
//! The GraphQL Admin API returns IDs as `gid://shopify/Product/123` while the
//! REST Admin API returns bare numbers. Results always carry the `gid://` form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Resource kinds that appear in a product creation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GidKind {
    Product,
    ProductVariant,
    ProductImage,
}

impl GidKind {
    /// The resource name used in the `gid://shopify/<Kind>/<id>` form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductVariant => "ProductVariant",
            Self::ProductImage => "ProductImage",
        }
    }
}

/// A Shopify global identifier such as `gid://shopify/Product/123`.
///
/// ```
/// use product_relay_core::{GidKind, ProductGid};
///
/// let synthesized = ProductGid::normalize(GidKind::Product, "123");
/// assert_eq!(synthesized.as_str(), "gid://shopify/Product/123");
///
/// let passthrough = ProductGid::normalize(GidKind::Product, "gid://shopify/Product/9");
/// assert_eq!(passthrough.as_str(), "gid://shopify/Product/9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductGid(String);

impl ProductGid {
    /// Scheme prefix shared by every global identifier.
    pub const SCHEME: &'static str = "gid://";

    /// Build a global identifier from an upstream ID.
    ///
    /// IDs already in `gid://` form are kept verbatim, whatever their kind.
    #[must_use]
    pub fn normalize(kind: GidKind, raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with(Self::SCHEME) {
            return Self(raw.to_owned());
        }
        Self(format!("{}shopify/{}/{raw}", Self::SCHEME, kind.as_str()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
