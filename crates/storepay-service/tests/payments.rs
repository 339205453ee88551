//! Payment initiation endpoint integration tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::atomic::Ordering;

use common::TestHarness;

#[tokio::test]
async fn create_payment_intent_returns_client_secret() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/create-payment-intent")
        .json(&json!({
            "name": "Alice",
            "amount": "12.50",
            "customerEmail": "alice@example.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["clientSecret"], "pi_test_123_secret_abc");
    assert_eq!(body["paymentIntentId"], "pi_test_123");
    assert_eq!(harness.processor.intent_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_payment_intent_rejects_missing_fields() {
    let harness = TestHarness::new();

    for body in [json!({"amount": "10"}), json!({"name": "Alice"}), json!({})] {
        let response = harness
            .server
            .post("/api/create-payment-intent")
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Name and amount are required");
    }

    // Rejected requests never reach the processor.
    assert_eq!(harness.processor.total_calls(), 0);
}

#[tokio::test]
async fn create_payment_intent_rejects_bad_amounts() {
    let harness = TestHarness::new();

    for amount in ["0", "-5", "ten dollars", "NaN", "inf"] {
        let response = harness
            .server
            .post("/api/create-payment-intent")
            .json(&json!({"name": "Alice", "amount": amount}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Amount must be a positive number", "amount {amount:?}");
    }

    assert_eq!(harness.processor.total_calls(), 0);
}

#[tokio::test]
async fn create_payment_intent_surfaces_processor_message() {
    let harness = TestHarness::new();
    harness.processor.fail_with("Your card was declined.");

    let response = harness
        .server
        .post("/api/create-payment-intent")
        .json(&json!({"name": "Alice", "amount": "10"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Your card was declined.");
}

#[tokio::test]
async fn create_payment_intent_without_processor_is_server_error() {
    let harness = TestHarness::without_processor();

    let response = harness
        .server
        .post("/api/create-payment-intent")
        .json(&json!({"name": "Alice", "amount": "10"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_checkout_returns_session_id_and_url() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/create-checkout")
        .json(&json!({
            "name": "Bob",
            "amount": "25",
            "customerEmail": "bob@example.com"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "cs_test_123");
    assert_eq!(body["url"], "https://checkout.stripe.com/c/pay/cs_test_123");
    assert_eq!(harness.processor.session_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_checkout_validates_before_processor() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/api/create-checkout")
        .json(&json!({"name": "Bob", "amount": "-1"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(harness.processor.total_calls(), 0);
}

#[tokio::test]
async fn list_payments_empty() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/payments").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["payments"].as_array().unwrap().len(), 0);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn result_pages_render() {
    let harness = TestHarness::new();

    let success = harness
        .server
        .get("/payment/success")
        .add_query_param("payment_intent", "pi_test_123")
        .await;
    success.assert_status_ok();
    let html = success.text();
    assert!(html.contains("Payment Successful"));
    assert!(html.contains("pi_test_123"));

    let cancel = harness.server.get("/payment/cancel").await;
    cancel.assert_status_ok();
    assert!(cancel.text().contains("Payment Cancelled"));
}

#[tokio::test]
async fn success_page_escapes_query_reference() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/payment/success")
        .add_query_param("session_id", "<script>alert(1)</script>")
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;"));
}
