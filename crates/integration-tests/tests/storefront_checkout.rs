//! Integration tests for the checkout flow.
//!
//! These tests require a migrated database and both servers running:
//! see the crate README. Run with `-- --ignored`.

use reqwest::StatusCode;
use serde_json::{Value, json};

use juniper_goods_integration_tests::{
    admin_base_url, admin_login, client, create_product, register_customer, shipping_info,
    storefront_base_url,
};

/// Fetch a product through the admin API (sees live inventory).
async fn product_inventory(admin: &reqwest::Client, product_id: &Value) -> i64 {
    let product: Value = admin
        .get(format!("{}/products/{product_id}", admin_base_url()))
        .send()
        .await
        .expect("get product request failed")
        .json()
        .await
        .expect("product response not JSON");
    product["inventory"].as_i64().expect("inventory is a number")
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_checkout_happy_path_decrements_inventory_and_prices_order() {
    let admin = client();
    admin_login(&admin).await;
    let product = create_product(&admin, "100", 5).await;

    let shopper = client();
    register_customer(&shopper).await;

    let resp = shopper
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [{ "product_id": product["id"], "quantity": 3 }],
            "shipping_info": shipping_info(),
            "payment_method": "CASH_ON_DELIVERY",
        }))
        .send()
        .await
        .expect("checkout request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("order response not JSON");

    // subtotal 300, shipping 49.99 (not above the free threshold),
    // tax 8% of 349.99 rounded to 28.00, total 377.99
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["subtotal"], "300.00");
    assert_eq!(order["shipping_fee"], "49.99");
    assert_eq!(order["tax"], "28.00");
    assert_eq!(order["total"], "377.99");
    assert_eq!(order["line_items"][0]["unit_price"], "100.00");

    assert_eq!(product_inventory(&admin, &product["id"]).await, 2);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_insufficient_stock_rejects_and_leaves_inventory_alone() {
    let admin = client();
    admin_login(&admin).await;
    let product = create_product(&admin, "100", 2).await;

    let shopper = client();
    register_customer(&shopper).await;

    let resp = shopper
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [{ "product_id": product["id"], "quantity": 3 }],
            "shipping_info": shipping_info(),
        }))
        .send()
        .await
        .expect("checkout request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error response not JSON");
    let message = body["error"].as_str().expect("error message is a string");
    assert!(message.contains("insufficient stock"), "got: {message}");
    assert!(message.contains("2 available"), "got: {message}");
    assert!(message.contains("3 requested"), "got: {message}");

    assert_eq!(product_inventory(&admin, &product["id"]).await, 2);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_mid_cart_failure_reserves_nothing() {
    let admin = client();
    admin_login(&admin).await;
    let plentiful = create_product(&admin, "10", 50).await;
    let scarce = create_product(&admin, "10", 1).await;

    let shopper = client();
    register_customer(&shopper).await;

    // The first line would succeed on its own; the second can't.
    let resp = shopper
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [
                { "product_id": plentiful["id"], "quantity": 5 },
                { "product_id": scarce["id"], "quantity": 2 },
            ],
            "shipping_info": shipping_info(),
        }))
        .send()
        .await
        .expect("checkout request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // All-or-nothing: the passing line was rolled back with the failing one.
    assert_eq!(product_inventory(&admin, &plentiful["id"]).await, 50);
    assert_eq!(product_inventory(&admin, &scarce["id"]).await, 1);

    // And no order was created.
    let orders: Value = shopper
        .get(format!("{}/orders", storefront_base_url()))
        .send()
        .await
        .expect("list orders request failed")
        .json()
        .await
        .expect("orders response not JSON");
    assert_eq!(orders.as_array().expect("orders is an array").len(), 0);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_empty_cart_rejected() {
    let shopper = client();
    register_customer(&shopper).await;

    let resp = shopper
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [],
            "shipping_info": shipping_info(),
        }))
        .send()
        .await
        .expect("checkout request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_unauthenticated_checkout_rejected() {
    let resp = client()
        .post(format!("{}/orders", storefront_base_url()))
        .json(&json!({
            "items": [{ "product_id": 1, "quantity": 1 }],
            "shipping_info": shipping_info(),
        }))
        .send()
        .await
        .expect("checkout request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront + admin servers and a migrated database"]
async fn test_concurrent_checkouts_for_last_unit_admit_exactly_one() {
    let admin = client();
    admin_login(&admin).await;
    let product = create_product(&admin, "25", 1).await;

    let shopper_a = client();
    register_customer(&shopper_a).await;
    let shopper_b = client();
    register_customer(&shopper_b).await;

    let body = json!({
        "items": [{ "product_id": product["id"], "quantity": 1 }],
        "shipping_info": shipping_info(),
    });

    let (resp_a, resp_b) = tokio::join!(
        shopper_a
            .post(format!("{}/orders", storefront_base_url()))
            .json(&body)
            .send(),
        shopper_b
            .post(format!("{}/orders", storefront_base_url()))
            .json(&body)
            .send(),
    );

    let status_a = resp_a.expect("checkout A failed").status();
    let status_b = resp_b.expect("checkout B failed").status();

    let successes = [status_a, status_b]
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(successes, 1, "exactly one checkout should win: {status_a}, {status_b}");

    assert_eq!(product_inventory(&admin, &product["id"]).await, 0);
}
