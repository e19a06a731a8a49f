//! Integration tests for the HTTP adapter.
//!
//! These tests verify HTTP-level behavior: bearer-token authentication,
//! bootstrap protection, rate limiting (429 responses) and a full
//! client/account/transfer flow through the middleware stack.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use teller_hex::{ConsoleService, inbound::HttpServer};
use teller_repo::MemoryLedger;
use teller_types::{BillerGateway, BillerReceipt, GatewayError, SubmitPayment};

/// A biller double that accepts every payment.
struct AcceptingBiller;

#[async_trait::async_trait]
impl BillerGateway for AcceptingBiller {
    async fn submit_payment(
        &self,
        _payment: &SubmitPayment,
    ) -> Result<BillerReceipt, GatewayError> {
        Ok(BillerReceipt { confirmation: None })
    }
}

/// Helper to create a test server with a rate limit.
fn create_test_server(requests_per_minute: u32) -> HttpServer<MemoryLedger, AcceptingBiller> {
    let service = ConsoleService::new(MemoryLedger::new(), AcceptingBiller);
    HttpServer::with_rate_limit(service, requests_per_minute)
}

fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

fn bootstrap_request() -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/bootstrap")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"name": "test-token"}"#))
        .unwrap()
}

/// Helper to make an authenticated API request.
fn api_request(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/accounts")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn json_post(uri: &str, token: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

/// Helper to bootstrap and extract the raw access token from the response.
async fn bootstrap_token(app: axum::Router) -> String {
    let response = app.oneshot(bootstrap_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["token"].as_str().unwrap().to_string()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_api_requires_token() {
    let server = create_test_server(100);
    let app = server.router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/accounts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bootstrap_only_works_once() {
    let server = create_test_server(100);
    let app = server.router();

    let _token = bootstrap_token(app.clone()).await;

    let second = app.oneshot(bootstrap_request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_account_transfer_flow() {
    let server = create_test_server(100);
    let app = server.router();
    let token = bootstrap_token(app.clone()).await;

    // Register a client.
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/clients",
            &token,
            serde_json::json!({
                "first_name": "Maria",
                "last_name": "Lopez Rodriguez",
                "national_id": "87654321",
                "email": "maria.lopez@example.com"
            })
            .to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let client = body_json(response).await;
    let client_id = client["id"].as_str().unwrap().to_string();

    // Open two BOB accounts.
    let mut account_ids = Vec::new();
    for balance in [550_050i64, 230_000] {
        let response = app
            .clone()
            .oneshot(json_post(
                "/api/accounts",
                &token,
                serde_json::json!({
                    "client_id": client_id,
                    "kind": "SAVINGS",
                    "currency": "BOB",
                    "initial_balance": balance
                })
                .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let account = body_json(response).await;
        account_ids.push(account["id"].as_str().unwrap().to_string());
    }

    // Internal transfer of Bs 500.00.
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/transfers/internal",
            &token,
            serde_json::json!({
                "from_account_id": account_ids[0],
                "to_account_id": account_ids[1],
                "amount": 50_000,
                "currency": "BOB",
                "memo": "between my accounts"
            })
            .to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let record = body_json(response).await;
    assert_eq!(record["kind"], "INTERNAL");
    assert_eq!(record["status"], "SUCCEEDED");

    // Balances after: 5,000.50 and 2,800.00.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/accounts/{}", account_ids[0]))
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let source = body_json(response).await;
    assert_eq!(source["balance"]["amount"], 500_050);
}

#[tokio::test]
async fn test_insufficient_funds_maps_to_400() {
    let server = create_test_server(100);
    let app = server.router();
    let token = bootstrap_token(app.clone()).await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/clients",
            &token,
            serde_json::json!({
                "first_name": "Carlos",
                "last_name": "Martinez",
                "national_id": "11111111",
                "email": "carlos@example.com"
            })
            .to_string(),
        ))
        .await
        .unwrap();
    let client = body_json(response).await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/accounts",
            &token,
            serde_json::json!({
                "client_id": client["id"],
                "kind": "CHECKING",
                "currency": "USD",
                "initial_balance": 1_000
            })
            .to_string(),
        ))
        .await
        .unwrap();
    let account = body_json(response).await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/operations/withdraw",
            &token,
            serde_json::json!({
                "account_id": account["id"],
                "amount": 5_000,
                "currency": "USD"
            })
            .to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Insufficient funds"));
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    // Create server with only 3 requests allowed per minute.
    // Bootstrap uses the "anonymous" key, so authenticated requests get
    // the full quota of 3.
    let server = create_test_server(3);
    let app = server.router();

    let token = bootstrap_token(app.clone()).await;

    for i in 1..=3 {
        let response = app.clone().oneshot(api_request(&token)).await.unwrap();
        assert_ne!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    let response = app.clone().oneshot(api_request(&token)).await.unwrap();

    assert_eq!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Request should be rate limited after exceeding quota"
    );

    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Rate limit exceeded")
    );
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let server = create_test_server(1);
    let app = server.router();

    // Health bypasses both auth and rate limiting entirely.
    for _ in 0..10 {
        let response = app.clone().oneshot(health_request()).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Health endpoint should not be rate limited"
        );
    }
}
