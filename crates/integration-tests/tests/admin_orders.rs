//! Integration tests for admin order management and access control.
//!
//! Run with `-- --ignored` against a live stack (see the crate README).

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use juniper_goods_integration_tests::{
    admin_base_url, admin_login, client, create_product, register_customer, shipping_info,
    storefront_base_url,
};

/// Place an order as a fresh customer; returns (customer client, order).
async fn place_order(admin: &Client) -> (Client, Value) {
    let product = create_product(admin, "20", 10).await;

    let shopper = client();
    register_customer(&shopper).await;

    let order: Value = shopper
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [{ "product_id": product["id"], "quantity": 1 }],
            "shipping_info": shipping_info(),
        }))
        .send()
        .await
        .expect("checkout request failed")
        .json()
        .await
        .expect("order response not JSON");

    (shopper, order)
}

/// Transition an order's status through the admin API.
async fn set_status(admin: &Client, order_id: &Value, status: &str) -> reqwest::Response {
    admin
        .put(format!("{}/orders/{order_id}/status", admin_base_url()))
        .json(&json!({ "status": status }))
        .send()
        .await
        .expect("status update request failed")
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_forward_status_walk() {
    let admin = client();
    admin_login(&admin).await;
    let (_, order) = place_order(&admin).await;

    for status in ["CONFIRMED", "PROCESSING", "SHIPPED", "DELIVERED"] {
        let resp = set_status(&admin, &order["id"], status).await;
        assert_eq!(resp.status(), StatusCode::OK, "transition to {status}");
        let updated: Value = resp.json().await.expect("order response not JSON");
        assert_eq!(updated["status"], status);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_terminal_states_reject_transitions() {
    let admin = client();
    admin_login(&admin).await;
    let (_, order) = place_order(&admin).await;

    // Cancel straight from PENDING, then try to leave CANCELLED.
    assert_eq!(
        set_status(&admin, &order["id"], "CANCELLED").await.status(),
        StatusCode::OK
    );
    for status in ["PENDING", "CONFIRMED", "DELIVERED"] {
        let resp = set_status(&admin, &order["id"], status).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "CANCELLED must be terminal (tried {status})"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_status_may_not_skip_steps() {
    let admin = client();
    admin_login(&admin).await;
    let (_, order) = place_order(&admin).await;

    let resp = set_status(&admin, &order["id"], "SHIPPED").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error response not JSON");
    assert!(
        body["error"]
            .as_str()
            .expect("error message is a string")
            .contains("cannot transition")
    );
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_status_updates_require_admin_session() {
    let admin = client();
    admin_login(&admin).await;
    let (_, order) = place_order(&admin).await;

    // No session at all.
    let resp = client()
        .put(format!("{}/orders/{}/status", admin_base_url(), order["id"]))
        .json(&json!({ "status": "CONFIRMED" }))
        .send()
        .await
        .expect("status update request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_customers_cannot_read_each_others_orders() {
    let admin = client();
    admin_login(&admin).await;
    let (_owner, order) = place_order(&admin).await;

    // A different customer asking for the same order id sees a 404,
    // never the order data.
    let other = client();
    register_customer(&other).await;

    let resp = other
        .get(format!("{}/orders/{}", storefront_base_url(), order["id"]))
        .send()
        .await
        .expect("order lookup request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_role_change_is_super_admin_only() {
    let admin = client();
    admin_login(&admin).await;

    // The seeded test admin is a super admin; it may change roles.
    let customers: Value = admin
        .get(format!("{}/customers", admin_base_url()))
        .send()
        .await
        .expect("list customers request failed")
        .json()
        .await
        .expect("customers response not JSON");
    assert!(customers.as_array().is_some());

    // An unauthenticated client may not.
    let resp = client()
        .put(format!("{}/customers/1/role", admin_base_url()))
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("role change request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
