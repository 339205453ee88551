//! Application state.

use std::sync::Arc;

use storepay_store::RocksStore;

use crate::config::ServiceConfig;
use crate::stripe::{Processor, StripeClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Payment processor (optional; payments disabled without it).
    pub processor: Option<Arc<dyn Processor>>,
}

impl AppState {
    /// Create a new application state, building a Stripe client from the
    /// configuration when an API key is present.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        let processor: Option<Arc<dyn Processor>> = config.stripe_api_key.as_ref().map(|key| {
            tracing::info!("Stripe integration enabled");
            Arc::new(StripeClient::new(key, config.stripe_webhook_secret.clone()))
                as Arc<dyn Processor>
        });

        if processor.is_none() {
            tracing::warn!("Stripe not configured - payments will not be available");
        }

        Self {
            store,
            config,
            processor,
        }
    }

    /// Create application state with an explicit processor (tests inject a
    /// fake here).
    #[must_use]
    pub fn with_processor(
        store: Arc<RocksStore>,
        config: ServiceConfig,
        processor: Arc<dyn Processor>,
    ) -> Self {
        Self {
            store,
            config,
            processor: Some(processor),
        }
    }

    /// Check if a payment processor is configured.
    #[must_use]
    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }
}
