//! HTTP-level tests for the storepay client against a mock server.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storepay_client::{ClientError, StorepayClient};

#[tokio::test]
async fn create_payment_intent_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-payment-intent"))
        .and(body_partial_json(serde_json::json!({
            "name": "Alice",
            "amount": "12.50",
            "customerEmail": "alice@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "clientSecret": "pi_1_secret_x",
            "paymentIntentId": "pi_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StorepayClient::new(server.uri());
    let response = client
        .create_payment_intent("Alice", "12.50", Some("alice@example.com"))
        .await
        .expect("intent creation should succeed");

    assert_eq!(response.client_secret, "pi_1_secret_x");
    assert_eq!(response.payment_intent_id, "pi_1");
}

#[tokio::test]
async fn absent_optionals_are_omitted_from_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-payment-intent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "clientSecret": "s",
            "paymentIntentId": "pi_2"
        })))
        .mount(&server)
        .await;

    let client = StorepayClient::new(server.uri());
    client
        .create_payment_intent("Alice", "5", None)
        .await
        .expect("should succeed");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("customerEmail").is_none());
    assert!(body.get("orderNote").is_none());
}

#[tokio::test]
async fn create_checkout_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-checkout"))
        .and(body_partial_json(serde_json::json!({
            "name": "Bob",
            "amount": "25"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_1",
            "url": "https://checkout.stripe.com/c/pay/cs_1"
        })))
        .mount(&server)
        .await;

    let client = StorepayClient::new(server.uri());
    let response = client
        .create_checkout("Bob", "25", None)
        .await
        .expect("checkout creation should succeed");

    assert_eq!(response.id, "cs_1");
    assert_eq!(response.url, "https://checkout.stripe.com/c/pay/cs_1");
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-payment-intent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Amount must be a positive number"
        })))
        .mount(&server)
        .await;

    let client = StorepayClient::new(server.uri());
    let err = client
        .create_payment_intent("Alice", "-1", None)
        .await
        .expect_err("should surface the API error");

    match err {
        ClientError::Api { message, status } => {
            assert_eq!(message, "Amount must be a positive number");
            assert_eq!(status, 400);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_error_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-checkout"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = StorepayClient::new(server.uri());
    let err = client
        .create_checkout("Bob", "25", None)
        .await
        .expect_err("should fail");

    match err {
        ClientError::Api { message, status } => {
            assert!(message.contains("502"));
            assert_eq!(status, 502);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
