//! Common test utilities for storepay integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use storepay_service::crypto;
use storepay_service::stripe::{
    CheckoutSession, CheckoutSessionParams, PaymentIntent, PaymentIntentParams, PaymentMethod,
    PaymentMethodCard, Processor,
};
use storepay_service::{create_router, AppState, ServiceConfig, StripeError};
use storepay_store::RocksStore;

/// Webhook secret used by the fake processor in tests.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test123secret456";

/// Timestamp baked into test signature headers.
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

/// A scriptable in-memory processor.
///
/// Counts calls so tests can assert that rejected requests never reach the
/// processor, and can be told to fail individual operations.
pub struct FakeProcessor {
    /// Webhook secret for signature verification (None = unconfigured).
    pub webhook_secret: Option<String>,
    /// Number of payment-intent creations seen.
    pub intent_calls: AtomicUsize,
    /// Number of checkout-session creations seen.
    pub session_calls: AtomicUsize,
    /// Number of payment-method retrievals seen.
    pub payment_method_calls: AtomicUsize,
    /// When set, creation calls fail with this API error message.
    pub fail_message: Mutex<Option<String>>,
    /// When set, payment-method retrieval fails.
    pub fail_payment_method: AtomicBool,
}

impl FakeProcessor {
    pub fn new() -> Self {
        Self {
            webhook_secret: Some(TEST_WEBHOOK_SECRET.to_string()),
            intent_calls: AtomicUsize::new(0),
            session_calls: AtomicUsize::new(0),
            payment_method_calls: AtomicUsize::new(0),
            fail_message: Mutex::new(None),
            fail_payment_method: AtomicBool::new(false),
        }
    }

    pub fn without_webhook_secret() -> Self {
        Self {
            webhook_secret: None,
            ..Self::new()
        }
    }

    /// Make creation calls fail with the given API error message.
    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    pub fn total_calls(&self) -> usize {
        self.intent_calls.load(Ordering::SeqCst)
            + self.session_calls.load(Ordering::SeqCst)
            + self.payment_method_calls.load(Ordering::SeqCst)
    }

    fn api_error(message: String) -> StripeError {
        StripeError::Api {
            error_type: "card_error".to_string(),
            message,
            code: None,
        }
    }
}

impl Default for FakeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Processor for FakeProcessor {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, StripeError> {
        self.intent_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(Self::api_error(message));
        }

        Ok(serde_json::from_value(serde_json::json!({
            "id": "pi_test_123",
            "amount": params.amount_cents,
            "currency": "usd",
            "status": "requires_payment_method",
            "client_secret": "pi_test_123_secret_abc",
            "metadata": {
                "customer_name": params.metadata.customer_name,
                "amount": params.metadata.amount,
                "customer_email": params.metadata.customer_email,
                "order_note": params.metadata.order_note,
                "phone_number": params.metadata.phone_number,
            }
        }))
        .expect("valid intent json"))
    }

    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, StripeError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(Self::api_error(message));
        }

        Ok(serde_json::from_value(serde_json::json!({
            "id": "cs_test_123",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123",
            "status": "open",
            "amount_total": params.amount_cents,
        }))
        .expect("valid session json"))
    }

    async fn retrieve_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<PaymentMethod, StripeError> {
        self.payment_method_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_payment_method.load(Ordering::SeqCst) {
            return Err(Self::api_error(format!(
                "No such payment method: {payment_method_id}"
            )));
        }

        Ok(PaymentMethod {
            id: payment_method_id.to_string(),
            method_type: Some("card".to_string()),
            card: Some(PaymentMethodCard {
                brand: Some("visa".to_string()),
                last4: Some("4242".to_string()),
            }),
        })
    }

    fn verify_webhook_signature(
        &self,
        payload: &str,
        signature: &str,
    ) -> Result<(), StripeError> {
        let secret = self
            .webhook_secret
            .as_ref()
            .ok_or_else(|| StripeError::Configuration("Webhook secret not configured".into()))?;

        crypto::verify_signature(secret, payload, signature)
            .map_err(|_| StripeError::InvalidSignature)
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store, for asserting on written records.
    pub store: Arc<RocksStore>,
    /// The fake processor, for asserting on call counts.
    pub processor: Arc<FakeProcessor>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and fake processor.
    pub fn new() -> Self {
        Self::with_processor(FakeProcessor::new())
    }

    /// Create a harness around a specific fake processor.
    pub fn with_processor(processor: FakeProcessor) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));
        let processor = Arc::new(processor);

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            stripe_webhook_secret: processor.webhook_secret.clone(),
            ..ServiceConfig::default()
        };

        let state = AppState::with_processor(Arc::clone(&store), config, processor.clone());
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            processor,
            _temp_dir: temp_dir,
        }
    }

    /// Create a harness with no processor configured at all.
    pub fn without_processor() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&store), config);
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self {
            server,
            store,
            processor: Arc::new(FakeProcessor::new()),
            _temp_dir: temp_dir,
        }
    }

    /// Build a valid signature header for a webhook payload.
    pub fn sign(payload: &str) -> String {
        crypto::sign_payload(TEST_WEBHOOK_SECRET, payload, TEST_TIMESTAMP)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
