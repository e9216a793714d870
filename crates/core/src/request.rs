//! Product creation request normalization.
//!
//! Raw inputs come from one of four HTTP entry points. Each shape is turned
//! into the same [`ProductCreationRequest`], or rejected with a
//! [`ValidationError`] before any upstream call is made.
//!
//! Percent-decoding of path and query values is done once by the HTTP
//! extractor; values reaching [`normalize`] are already decoded and are never
//! re-encoded.

use crate::types::{Price, PriceError};

/// The HTTP entry point a request arrived through.
///
/// The entry point decides how a missing title is handled: GET entries
/// synthesize one from the price, the JSON body entry requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `GET /create-product/{price}`
    PriceOnly,
    /// `GET /create-product/{price}/{title}`
    PriceAndTitle,
    /// `GET /create-product-full/{price}?title=&image=&description=&vendor=`
    FullQuery,
    /// `POST /create-product`
    JsonBody,
}

impl EntryPoint {
    /// Whether a blank or missing title is a validation failure.
    #[must_use]
    pub const fn requires_title(self) -> bool {
        matches!(self, Self::JsonBody)
    }
}

/// Unvalidated request fields, as extracted from the path, query or body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProductInput {
    pub price: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub image_url: Option<String>,
}

/// Validation failures, detected before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Price missing, non-numeric, or not greater than zero.
    #[error("Invalid price. Price must be a positive number.")]
    InvalidPrice {
        /// The price as received (empty when absent).
        raw: String,
        /// Why it was rejected.
        reason: PriceError,
    },

    /// Title missing or blank where one is required.
    #[error("Title is required.")]
    MissingTitle,
}

impl ValidationError {
    /// Human-readable detail for the error body.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::InvalidPrice { raw, reason } => format!("{reason} (received {raw:?})"),
            Self::MissingTitle => "title must be a non-empty string".to_string(),
        }
    }
}

/// A validated product creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCreationRequest {
    /// Entry point the request came through.
    pub entry: EntryPoint,
    /// Product title (provided or synthesized).
    pub title: String,
    /// Product price.
    pub price: Price,
    /// HTML description (provided or synthesized).
    pub description: String,
    /// Vendor name, empty when not provided.
    pub vendor: String,
    /// Image URL, empty when not provided.
    pub image_url: String,
}

impl ProductCreationRequest {
    /// The image URL, if one was provided and is not blank.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        let url = self.image_url.trim();
        (!url.is_empty()).then_some(url)
    }

    /// Message returned alongside the created product.
    #[must_use]
    pub fn success_message(&self) -> String {
        match self.entry {
            EntryPoint::PriceOnly => {
                format!("Product created successfully with price ${}", self.price)
            }
            _ => format!(
                "Product \"{}\" created successfully with price ${}",
                self.title, self.price
            ),
        }
    }
}

/// Validate raw inputs and fill in defaults.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPrice`] if the price is missing, not a
/// number, or not greater than zero. Returns [`ValidationError::MissingTitle`]
/// if the entry point requires a title and none (or only whitespace) was given.
pub fn normalize(
    entry: EntryPoint,
    input: RawProductInput,
) -> Result<ProductCreationRequest, ValidationError> {
    let raw_price = input.price.unwrap_or_default();
    let price = Price::parse(&raw_price).map_err(|reason| ValidationError::InvalidPrice {
        raw: raw_price.clone(),
        reason,
    })?;

    let provided_title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && entry != EntryPoint::PriceOnly);

    let title = match provided_title {
        Some(title) => title.to_string(),
        None if entry.requires_title() => return Err(ValidationError::MissingTitle),
        None => default_title(price),
    };

    let description = input
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| default_description(&title, price));

    Ok(ProductCreationRequest {
        entry,
        title,
        price,
        description,
        vendor: input.vendor.unwrap_or_default(),
        image_url: input.image_url.unwrap_or_default(),
    })
}

fn default_title(price: Price) -> String {
    format!("Product - ${price}")
}

fn default_description(title: &str, price: Price) -> String {
    format!("<p>{title} is available for ${price}.</p>")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(price: &str) -> RawProductInput {
        RawProductInput {
            price: Some(price.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_price_only_synthesizes_title_and_description() {
        let request = normalize(EntryPoint::PriceOnly, input("19.9")).unwrap();

        assert_eq!(request.title, "Product - $19.90");
        assert!(request.description.contains("$19.90"));
        assert!(request.description.starts_with("<p>"));
        assert_eq!(request.vendor, "");
        assert_eq!(request.image_url(), None);
        assert_eq!(
            request.success_message(),
            "Product created successfully with price $19.90"
        );
    }

    #[test]
    fn test_invalid_prices_rejected_on_every_entry() {
        let entries = [
            EntryPoint::PriceOnly,
            EntryPoint::PriceAndTitle,
            EntryPoint::FullQuery,
            EntryPoint::JsonBody,
        ];
        for entry in entries {
            for raw in ["0", "-3", "abc", "", "0.00"] {
                let mut raw_input = input(raw);
                raw_input.title = Some("Shirt".to_string());
                let err = normalize(entry, raw_input).unwrap_err();
                assert!(
                    matches!(err, ValidationError::InvalidPrice { .. }),
                    "{entry:?} {raw}"
                );
            }
        }
    }

    #[test]
    fn test_missing_price_is_invalid_price() {
        let err = normalize(EntryPoint::JsonBody, RawProductInput::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidPrice {
                raw: String::new(),
                reason: PriceError::Empty,
            }
        );
    }

    #[test]
    fn test_price_checked_before_title() {
        let err = normalize(EntryPoint::JsonBody, input("nope")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPrice { .. }));
    }

    #[test]
    fn test_body_entry_requires_title() {
        for title in [None, Some(""), Some("   "), Some("\t\n")] {
            let mut raw_input = input("10");
            raw_input.title = title.map(String::from);
            let err = normalize(EntryPoint::JsonBody, raw_input).unwrap_err();
            assert_eq!(err, ValidationError::MissingTitle);
            assert_eq!(err.to_string(), "Title is required.");
        }
    }

    #[test]
    fn test_get_entries_synthesize_blank_title() {
        for entry in [EntryPoint::PriceAndTitle, EntryPoint::FullQuery] {
            let mut raw_input = input("5");
            raw_input.title = Some("  ".to_string());
            let request = normalize(entry, raw_input).unwrap();
            assert_eq!(request.title, "Product - $5.00");
        }
    }

    #[test]
    fn test_decoded_title_used_verbatim() {
        let mut raw_input = input("12.5");
        raw_input.title = Some("Café & Crème 100%".to_string());
        let request = normalize(EntryPoint::PriceAndTitle, raw_input).unwrap();

        assert_eq!(request.title, "Café & Crème 100%");
        assert!(request.description.contains("Café & Crème 100%"));
        assert!(request.description.contains("$12.50"));
        assert_eq!(
            request.success_message(),
            "Product \"Café & Crème 100%\" created successfully with price $12.50"
        );
    }

    #[test]
    fn test_provided_fields_kept() {
        let raw_input = RawProductInput {
            price: Some("42".to_string()),
            title: Some("Mug".to_string()),
            description: Some("<p>A mug</p>".to_string()),
            vendor: Some("Acme".to_string()),
            image_url: Some(" http://x/y.jpg ".to_string()),
        };
        let request = normalize(EntryPoint::FullQuery, raw_input).unwrap();

        assert_eq!(request.description, "<p>A mug</p>");
        assert_eq!(request.vendor, "Acme");
        assert_eq!(request.image_url(), Some("http://x/y.jpg"));
        assert_eq!(request.price.formatted(), "42.00");
    }

    #[test]
    fn test_blank_description_synthesized() {
        let mut raw_input = input("3");
        raw_input.title = Some("Pen".to_string());
        raw_input.description = Some(" ".to_string());
        let request = normalize(EntryPoint::JsonBody, raw_input).unwrap();
        assert_eq!(request.description, "<p>Pen is available for $3.00.</p>");
    }

    #[test]
    fn test_invalid_price_details_echo_input() {
        let err = normalize(EntryPoint::PriceOnly, input("-1")).unwrap_err();
        assert_eq!(
            err.details(),
            "price must be greater than zero (received \"-1\")"
        );
    }
}
