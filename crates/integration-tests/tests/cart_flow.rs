//! End-to-end cart fragment tests.
//!
//! The cart lives in the session, so each test drives a cookie-holding
//! client through the HTMX fragment endpoints the way the page would.
//!
//! These tests require:
//! - A running `PostgreSQL` database (migrated via `kharido-cli migrate storefront`)
//! - The storefront running (cargo run -p kharido-storefront)
//!
//! Run with: cargo test -p kharido-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("KHARIDO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register, log in, and create one product; returns (client, product id).
async fn client_with_product(price: f64) -> (Client, String) {
    let client = client();
    let base = base_url();
    let email = format!("cart-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{base}/users/register"))
        .json(&json!({
            "name": "Cart Shopper",
            "email": email,
            "password": "a perfectly fine password",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/users/login"))
        .json(&json!({"email": email, "password": "a perfectly fine password"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base}/products"))
        .json(&json!({
            "name": format!("Cart Product {}", Uuid::new_v4()),
            "price": price,
            "img": "",
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let id = body["product"]["id"]
        .as_str()
        .expect("product id missing")
        .to_string();

    (client, id)
}

async fn add_to_cart(client: &Client, product_id: &str) -> String {
    let resp = client
        .post(format!("{}/cart/add", base_url()))
        .form(&[("product_id", product_id)])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    resp.text().await.expect("Failed to read fragment")
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn adding_twice_increments_the_badge() {
    let (client, id) = client_with_product(49.99).await;

    let badge = add_to_cart(&client, &id).await;
    assert!(badge.contains(">1<"), "badge should show 1, got: {badge}");

    let badge = add_to_cart(&client, &id).await;
    assert!(badge.contains(">2<"), "badge should show 2, got: {badge}");

    let resp = client
        .get(format!("{}/cart/count", base_url()))
        .send()
        .await
        .expect("Failed to get badge");
    let body = resp.text().await.expect("Failed to read badge");
    assert!(body.contains(">2<"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn quantity_zero_clamps_to_one() {
    let (client, id) = client_with_product(10.0).await;
    add_to_cart(&client, &id).await;

    let resp = client
        .post(format!("{}/cart/update", base_url()))
        .form(&[("product_id", id.as_str()), ("quantity", "0")])
        .send()
        .await
        .expect("Failed to update quantity");
    assert_eq!(resp.status(), StatusCode::OK);

    let items = resp.text().await.expect("Failed to read fragment");
    assert!(
        items.contains(r#"<span class="cart-item-count">1</span>"#),
        "quantity should clamp to 1, got: {items}"
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn removing_an_item_empties_the_panel() {
    let (client, id) = client_with_product(10.0).await;
    add_to_cart(&client, &id).await;

    let resp = client
        .post(format!("{}/cart/remove", base_url()))
        .form(&[("product_id", id.as_str())])
        .send()
        .await
        .expect("Failed to remove item");
    assert_eq!(resp.status(), StatusCode::OK);

    let items = resp.text().await.expect("Failed to read fragment");
    assert!(items.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn checkout_on_an_empty_cart_is_rejected() {
    let resp = client()
        .post(format!("{}/cart/checkout", base_url()))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "Your cart is empty");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn checkout_clears_the_cart() {
    let (client, id) = client_with_product(25.0).await;
    add_to_cart(&client, &id).await;

    let resp = client
        .post(format!("{}/cart/checkout", base_url()))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/cart/count", base_url()))
        .send()
        .await
        .expect("Failed to get badge");
    let body = resp.text().await.expect("Failed to read badge");
    assert!(body.contains(">0<"), "cart should be empty after checkout");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn panel_open_and_close_round_trip() {
    let client = client();
    let base = base_url();

    let resp = client
        .post(format!("{base}/cart/open"))
        .send()
        .await
        .expect("Failed to open panel");
    let body = resp.text().await.expect("Failed to read panel");
    assert!(body.contains("cart-panel open"));

    let resp = client
        .post(format!("{base}/cart/close"))
        .send()
        .await
        .expect("Failed to close panel");
    let body = resp.text().await.expect("Failed to read panel");
    assert!(!body.contains("cart-panel open"));
    assert!(body.contains(r#"aria-hidden="true""#));
}
