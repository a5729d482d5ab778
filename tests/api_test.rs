//! HTTP API tests driven through the router in-process

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::*;
use rug_hunter::api::{create_router, AppState, RateLimiter};
use rug_hunter::api::middleware::RateLimitConfig;
use rug_hunter::storage::EphemeralStorage;
use rug_hunter::AddressListStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app_with(ledger: MockLedger) -> Router {
    let store = AddressListStore::new(Arc::new(EphemeralStorage::new()));
    let state = AppState::new(store, resolver_over(Arc::new(ledger)));
    create_router(Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app_with(MockLedger::new());
    for uri in ["/health", "/v1/health"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
    }
}

#[tokio::test]
async fn test_authority_lookup() {
    let mint = test_key(1);
    let app = app_with(MockLedger::new().with_mint(mint, Some(test_key(2))));

    let (status, body) = send(&app, get(&format!("/v1/authority?mintAddress={mint}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["authorityType"], "mintAuthority");
    assert_eq!(body["data"]["authority"], test_key(2).to_string());
    assert!(body["latencyMs"].is_number());
}

#[tokio::test]
async fn test_authority_error_mapping() {
    let app = app_with(MockLedger::new());

    let (status, body) = send(&app, get("/v1/authority?mintAddress=not-a-valid-address")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["kind"], "InvalidInput");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = send(&app, get("/v1/authority")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get(&format!("/v1/authority?mintAddress={}", test_key(1)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "NotFound");
}

#[tokio::test]
async fn test_timeout_maps_to_gateway_timeout() {
    let mint = test_key(1);
    let ledger = MockLedger::new()
        .with_mint(mint, Some(test_key(2)))
        .with_delay(Duration::from_millis(500));
    let store = AddressListStore::new(Arc::new(EphemeralStorage::new()));
    let resolver = rug_hunter::AuthorityResolver::new(Arc::new(ledger), Duration::from_millis(20));
    let app = create_router(Arc::new(AppState::new(store, resolver)));

    let (status, body) = send(&app, get(&format!("/v1/authority?mintAddress={mint}"))).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"]["code"], "RESOLUTION_TIMEOUT");
    assert_eq!(body["error"]["kind"], "ResolutionError");
}

#[tokio::test]
async fn test_list_maintenance_and_classification() {
    let (mint, authority) = (test_key(1), test_key(2));
    let app = app_with(MockLedger::new().with_metadata(mint, Some(authority)));

    let add = json!({"address": authority.to_string(), "operation": "add"});
    let (status, body) = send(&app, post("/v1/lists/rugged", add.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["reason"], "added");
    assert_eq!(body["data"]["changed"], true);
    assert_eq!(body["data"]["snapshot"], json!([authority.to_string().to_lowercase()]));
    assert!(body["data"]["warning"].is_string(), "ephemeral backend warns");

    let (_, body) = send(&app, post("/v1/lists/rugged", add)).await;
    assert_eq!(body["data"]["success"], true);
    assert_eq!(body["data"]["reason"], "already_present");
    assert_eq!(body["data"]["changed"], false);

    let (status, body) = send(&app, get("/v1/lists/rugged")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["listName"], "rugged");
    assert_eq!(body["data"]["count"], 1);

    let uri = format!("/v1/lists/rugged/{}", authority.to_string().to_uppercase());
    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(body["data"]["member"], true);

    let (status, body) = send(&app, post("/v1/classify", json!({"mintAddress": mint.to_string()}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verdict"], "Rugged");
    assert_eq!(body["data"]["authority"], authority.to_string().to_lowercase());

    let remove = json!({"listName": "rugged", "address": authority.to_string(), "operation": "remove"});
    let (_, body) = send(&app, post("/v1/lists", remove)).await;
    assert_eq!(body["data"]["reason"], "removed");
    assert_eq!(body["data"]["snapshot"], json!([]));
}

#[tokio::test]
async fn test_unknown_list_is_invalid_input() {
    let app = app_with(MockLedger::new());

    let (status, body) = send(&app, get("/v1/lists/bogus")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "InvalidInput");

    let add = json!({"address": test_key(1).to_string(), "operation": "add"});
    let (status, _) = send(&app, post("/v1/lists/bogus", add)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_limit_rejects_excess_requests() {
    let store = AddressListStore::new(Arc::new(EphemeralStorage::new()));
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        requests_per_window: 2,
        window_duration: Duration::from_secs(60),
    }));
    let state = AppState::new(store, resolver_over(Arc::new(MockLedger::new())))
        .with_rate_limiter(limiter);
    let app = create_router(Arc::new(state));

    let request = || {
        Request::builder()
            .uri("/v1/lists/good")
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap()
    };

    assert_eq!(send(&app, request()).await.0, StatusCode::OK);
    assert_eq!(send(&app, request()).await.0, StatusCode::OK);
    let (status, body) = send(&app, request()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");

    // Health checks bypass the limiter
    assert_eq!(send(&app, get("/v1/health")).await.0, StatusCode::OK);
}
