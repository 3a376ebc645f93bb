//! Integration tests for profile save and fetch.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p donate-bridge-api)
//! - `TEST_ID_TOKEN` set to a valid Firebase ID token; every test here
//!   skips itself when it is absent
//!
//! Run with: cargo test -p donate-bridge-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use donate_bridge_integration_tests::{TestContext, id_token};

/// Save a profile payload and assert the confirmation message.
async fn save_profile(ctx: &TestContext, token: &str, payload: &Value) {
    let resp = ctx
        .client
        .post(ctx.url("/profile"))
        .bearer_auth(token)
        .json(payload)
        .send()
        .await
        .expect("Failed to save profile");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("message"),
        Some(&Value::String("Profile saved".to_string()))
    );
}

/// Fetch the caller's profile.
async fn fetch_profile(ctx: &TestContext, token: &str) -> Value {
    let resp = ctx
        .client
        .get(ctx.url("/profile"))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to fetch profile");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_profile_save_and_fetch() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();
    let phone = format!("test-{}", Uuid::new_v4());

    save_profile(
        &ctx,
        &token,
        &json!({
            "phone": phone,
            "address": {
                "line1": "12 Test Lane",
                "line2": "Flat 3",
                "city": "Pune",
                "state": "Maharashtra",
                "pincode": "411001",
                "country": "India"
            }
        }),
    )
    .await;

    let profile = fetch_profile(&ctx, &token).await;
    assert_eq!(profile.get("phone"), Some(&Value::String(phone)));
    assert_eq!(
        profile.get("address_line1"),
        Some(&Value::String("12 Test Lane".to_string()))
    );
    assert_eq!(profile.get("city"), Some(&Value::String("Pune".to_string())));
    assert_eq!(
        profile.get("pincode"),
        Some(&Value::String("411001".to_string()))
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_profile_second_save_overwrites() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();
    let replacement = format!("test-{}", Uuid::new_v4());

    save_profile(
        &ctx,
        &token,
        &json!({
            "phone": format!("test-{}", Uuid::new_v4()),
            "address": { "city": "Mumbai" }
        }),
    )
    .await;
    save_profile(
        &ctx,
        &token,
        &json!({
            "phone": replacement,
            "address": { "city": "Nagpur" }
        }),
    )
    .await;

    let profile = fetch_profile(&ctx, &token).await;
    assert_eq!(profile.get("phone"), Some(&Value::String(replacement)));
    assert_eq!(
        profile.get("city"),
        Some(&Value::String("Nagpur".to_string()))
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_profile_save_without_address_clears_fields() {
    let Some(token) = id_token() else {
        return; // No token in the environment, skip
    };
    let ctx = TestContext::new();
    let phone = format!("test-{}", Uuid::new_v4());

    save_profile(
        &ctx,
        &token,
        &json!({
            "phone": format!("test-{}", Uuid::new_v4()),
            "address": { "city": "Chennai" }
        }),
    )
    .await;

    // A save is a whole-record replacement, not a merge.
    save_profile(&ctx, &token, &json!({ "phone": phone })).await;

    let profile = fetch_profile(&ctx, &token).await;
    assert_eq!(profile.get("phone"), Some(&Value::String(phone)));
    assert_eq!(profile.get("city"), Some(&Value::Null));
}
