//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ShopifyConfig;
use crate::shopify::{UpstreamError, UpstreamProductCreator, creator_from_config};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the one upstream creator chosen at
/// startup; handlers never pick a strategy per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    creator: Box<dyn UpstreamProductCreator>,
}

impl AppState {
    /// Create state around an already-built creator.
    #[must_use]
    pub fn new(creator: Box<dyn UpstreamProductCreator>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { creator }),
        }
    }

    /// Build state with the creator selected by `config.strategy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream client cannot be built.
    pub fn from_config(config: &ShopifyConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(creator_from_config(config)?))
    }

    /// Get the upstream product creator.
    #[must_use]
    pub fn creator(&self) -> &dyn UpstreamProductCreator {
        self.inner.creator.as_ref()
    }
}
