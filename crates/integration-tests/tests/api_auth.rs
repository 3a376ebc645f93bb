//! Integration tests for login and request authentication.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p donate-bridge-api)
//!
//! Token-dependent tests also need `TEST_ID_TOKEN` set to a valid
//! Firebase ID token and skip themselves when it is absent.
//!
//! Run with: cargo test -p donate-bridge-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use donate_bridge_integration_tests::{TestContext, id_token};

// ============================================================================
// Liveness
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_banner() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to get banner");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body, "Backend running 🚀");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_readiness() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_login_without_body_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/auth/google"))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body, "No token");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_login_with_null_token_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/auth/google"))
        .json(&json!({ "token": null }))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body, "No token");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_login_with_garbage_token_is_unauthorized() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/auth/google"))
        .json(&json!({ "token": "not-a-real-token" }))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_login_with_valid_token() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/auth/google"))
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("message"),
        Some(&Value::String("Login success".to_string()))
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_login_twice_with_same_token() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();

    // Second login must reconcile against the existing user row, not fail.
    for _ in 0..2 {
        let resp = ctx
            .client
            .post(ctx.url("/auth/google"))
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("Failed to post login");

        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_concurrent_logins_with_same_token() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();

    // Both logins race on the user row's unique subject id; whichever one
    // loses the insert must still succeed by picking up the existing row.
    let login = || {
        ctx.client
            .post(ctx.url("/auth/google"))
            .json(&json!({ "token": token }))
            .send()
    };
    let (first, second) = tokio::join!(login(), login());

    assert_eq!(
        first.expect("Failed to post login").status(),
        StatusCode::OK
    );
    assert_eq!(
        second.expect("Failed to post login").status(),
        StatusCode::OK
    );
}

// ============================================================================
// Request authentication
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_protected_routes_reject_missing_token() {
    let ctx = TestContext::new();

    let requests = [
        ctx.client.get(ctx.url("/donations")),
        ctx.client.post(ctx.url("/donations")),
        ctx.client.get(ctx.url("/my-donations")),
        ctx.client.get(ctx.url("/profile")),
        ctx.client.post(ctx.url("/profile")),
    ];

    for request in requests {
        let resp = request.send().await.expect("Failed to send request");

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = resp.text().await.expect("Failed to read response");
        assert_eq!(body, "Unauthorized");
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_protected_routes_reject_malformed_header() {
    let ctx = TestContext::new();

    // Token without the Bearer scheme
    let resp = ctx
        .client
        .get(ctx.url("/my-donations"))
        .header("Authorization", "some-token")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Bearer scheme with an invalid token
    let resp = ctx
        .client
        .get(ctx.url("/my-donations"))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
