//! Core types for Product Relay.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod gid;
pub mod price;
pub mod product;

pub use gid::{GidKind, ProductGid};
pub use price::{Price, PriceError, format_amount};
pub use product::{Nodes, ProductCreationResult, ProductImage, ProductVariant};
