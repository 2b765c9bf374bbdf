//! Integration tests for the storefront catalog and user endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database (migrated via `kharido-cli migrate storefront`)
//! - The storefront running (cargo run -p kharido-storefront)
//!
//! Run with: cargo test -p kharido-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront (configurable via environment).
fn base_url() -> String {
    std::env::var("KHARIDO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with a cookie store so the session survives requests.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Test helper: register and log in a fresh throwaway account.
async fn logged_in_client() -> Client {
    let client = client();
    let base = base_url();
    let email = format!("shopper-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{base}/users/register"))
        .json(&json!({
            "name": "Test Shopper",
            "email": email,
            "password": "a perfectly fine password",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/users/login"))
        .json(&json!({
            "email": email,
            "password": "a perfectly fine password",
        }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    client
}

/// Test helper: create a catalog product and return its id.
async fn create_product(client: &Client, name: &str, price: f64) -> String {
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({"name": name, "price": price, "img": ""}))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Product added");
    body["product"]["id"]
        .as_str()
        .expect("product id missing")
        .to_string()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn health_endpoints_respond() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("Failed to reach /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .expect("Failed to reach /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn product_listing_is_a_json_array() {
    let resp = client()
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn product_creation_requires_a_session() {
    let resp = client()
        .post(format!("{}/products", base_url()))
        .json(&json!({"name": "No Auth", "price": 1.0}))
        .send()
        .await
        .expect("Failed to post product");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn created_products_appear_in_the_listing() {
    let client = logged_in_client().await;
    let name = format!("Integration Shoe {}", Uuid::new_v4());
    let id = create_product(&client, &name, 49.99).await;

    let resp = client
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");
    let body: Value = resp.json().await.expect("Failed to parse response");

    let listed = body
        .as_array()
        .expect("array")
        .iter()
        .any(|p| p["id"] == Value::String(id.clone()));
    assert!(listed, "created product should be listed");
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn duplicate_registration_conflicts() {
    let client = client();
    let base = base_url();
    let email = format!("dupe-{}@example.com", Uuid::new_v4());
    let payload = json!({
        "name": "Dupe",
        "email": email,
        "password": "a perfectly fine password",
    });

    let resp = client
        .post(format!("{base}/users/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/users/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to re-register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn wrong_password_is_unauthorized() {
    let client = client();
    let base = base_url();
    let email = format!("login-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{base}/users/register"))
        .json(&json!({
            "name": "Login Test",
            "email": email,
            "password": "a perfectly fine password",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/users/login"))
        .json(&json!({"email": email, "password": "not the password"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
