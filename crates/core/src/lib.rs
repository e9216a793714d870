//! Product Relay Core - Shared types library.
//!
//! This crate provides the request and result types used by the relay:
//! - [`request`] - Turns raw path/query/body inputs into a validated
//!   [`ProductCreationRequest`]
//! - [`types`] - Newtype wrappers for prices and Shopify global IDs, plus the
//!   uniform product result shape
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Validation happens here so that nothing reaches the upstream
//! product API until the request is known to be well formed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod request;
pub mod types;

pub use request::{EntryPoint, ProductCreationRequest, RawProductInput, ValidationError, normalize};
pub use types::*;
