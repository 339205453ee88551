//! Payment processor integration.
//!
//! The processor handles:
//! - Payment intent creation (embedded card form path)
//! - Hosted checkout sessions
//! - Payment method details (card brand/last4)
//! - Webhook signature verification
//!
//! Handlers depend on the [`Processor`] trait rather than the concrete
//! [`StripeClient`], so the recorder and the initiators are testable with a
//! fake processor.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::{StripeClient, StripeError};
pub use types::*;

/// The payment processor interface.
///
/// Implemented by [`StripeClient`] against the live Stripe API, and by fakes
/// in tests. Every method is fire-once: no retries happen at this layer.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Create a payment intent and return it with its client secret.
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, StripeError>;

    /// Create a hosted checkout session and return it with its URL.
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, StripeError>;

    /// Retrieve a payment method by ID for card details.
    async fn retrieve_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<PaymentMethod, StripeError>;

    /// Verify a webhook signature header against a raw payload.
    ///
    /// # Errors
    ///
    /// `StripeError::Configuration` if no webhook secret is configured,
    /// `StripeError::InvalidSignature` if verification fails.
    fn verify_webhook_signature(&self, payload: &str, signature: &str)
        -> Result<(), StripeError>;
}
