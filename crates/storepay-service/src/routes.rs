//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, pages, payments, webhooks};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Checkout API
/// - `POST /api/create-payment-intent` - Create an intent for the embedded card form
/// - `POST /api/create-checkout` - Create a hosted checkout session
/// - `GET /api/payments` - List recorded payments
///
/// ## Webhooks (signature verification)
/// - `POST /api/webhook` - Stripe events
///
/// ## Result pages
/// - `GET /payment/success` - Success page (session or intent id in query)
/// - `GET /payment/cancel` - Cancellation page
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Checkout API
        .route(
            "/api/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route("/api/create-checkout", post(payments::create_checkout))
        .route("/api/payments", get(payments::list_payments))
        // Webhooks
        .route("/api/webhook", post(webhooks::stripe_webhook))
        // Result pages
        .route("/payment/success", get(pages::payment_success))
        .route("/payment/cancel", get(pages::payment_cancel))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
