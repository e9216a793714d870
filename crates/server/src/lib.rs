//! Product relay server library.
//!
//! Exposes the router, configuration, and Shopify adapters as a library so
//! the binary stays thin and the integration tests can mount the same app.
//!
//! # Security
//!
//! The configured Shopify credentials can create products in the store.
//! They are read once at startup and never logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod shopify;
pub mod state;
