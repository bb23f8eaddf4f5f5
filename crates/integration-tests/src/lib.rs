//! Integration test helpers for Juniper Goods.
//!
//! # Running Tests
//!
//! These tests drive the real HTTP APIs, so they need a migrated database
//! and both servers running:
//!
//! ```bash
//! jg-cli migrate && jg-cli seed
//! jg-cli admin create -e admin@example.com -p adminpass --role super_admin
//! cargo run -p juniper-goods-storefront &
//! cargo run -p juniper-goods-admin &
//! cargo test -p juniper-goods-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` (default `http://localhost:3000`)
//! - `ADMIN_BASE_URL` (default `http://localhost:3001`)
//! - `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD` (default
//!   `admin@example.com` / `adminpass`)

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store (sessions live in cookies).
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log a client in as the test admin.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn admin_login(client: &Client) {
    let email =
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "adminpass".to_string());

    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("admin login request failed");
    assert!(
        resp.status().is_success(),
        "admin login rejected: {}",
        resp.status()
    );
}

/// Register and log in a fresh storefront customer; returns its email.
///
/// # Panics
///
/// Panics if registration fails.
pub async fn register_customer(client: &Client) -> String {
    let email = format!("shopper-{}@example.com", Uuid::new_v4().simple());
    let resp = client
        .post(format!("{}/auth/register", storefront_base_url()))
        .json(&json!({
            "email": email,
            "password": "shopper-password",
            "first_name": "Test",
            "last_name": "Shopper",
        }))
        .send()
        .await
        .expect("register request failed");
    assert!(
        resp.status().is_success(),
        "registration rejected: {}",
        resp.status()
    );
    email
}

/// Create a product through the admin API; returns the product JSON.
///
/// The admin client must already be logged in. A fresh category is created
/// for each product so tests don't step on each other.
///
/// # Panics
///
/// Panics if any request fails.
pub async fn create_product(admin: &Client, price: &str, inventory: i32) -> Value {
    let tag = Uuid::new_v4().simple().to_string();

    let category: Value = admin
        .post(format!("{}/categories", admin_base_url()))
        .json(&json!({ "name": format!("Test {tag}"), "slug": format!("test-{tag}") }))
        .send()
        .await
        .expect("create category request failed")
        .json()
        .await
        .expect("category response not JSON");

    admin
        .post(format!("{}/products", admin_base_url()))
        .json(&json!({
            "category_id": category["id"],
            "name": format!("Widget {tag}"),
            "slug": format!("widget-{tag}"),
            "description": "integration test product",
            "price": price,
            "inventory": inventory,
        }))
        .send()
        .await
        .expect("create product request failed")
        .json()
        .await
        .expect("product response not JSON")
}

/// The standard shipping info body used by checkout tests.
#[must_use]
pub fn shipping_info() -> Value {
    json!({
        "first_name": "Test",
        "last_name": "Shopper",
        "email": "shipping@example.com",
        "phone": "555-123-4567",
        "street": "1 Test Lane",
        "city": "Testville",
        "state": "TS",
        "postal_code": "12345",
        "country": "US",
    })
}
