//! Order route handlers: checkout and order tracking.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use juniper_goods_core::{OrderId, PaymentMethod};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::checkout::{CartItem, ShippingInfo, place_order};
use crate::services::guest::resolve_guest;
use crate::state::AppState;

/// Checkout request body, shared by the authenticated and guest entry points.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<CartItem>,
    pub shipping_info: ShippingInfo,
    /// Defaults to cash on delivery; unknown values are stored as OTHER and
    /// not processed differently.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Place an order for the logged-in customer.
#[instrument(skip(state, request), fields(customer_id = %customer.id))]
pub async fn create(
    RequireAuth(customer): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = place_order(
        state.pool(),
        &state.config().pricing,
        customer.id,
        &request.items,
        &request.shipping_info,
        request.payment_method,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Place an order as a guest.
///
/// Resolves a guest identity from the shipping contact fields, then runs the
/// same order-building path as the authenticated endpoint.
#[instrument(skip(state, request))]
pub async fn create_guest(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let guest = resolve_guest(state.pool(), &request.shipping_info).await?;

    let order = place_order(
        state.pool(),
        &state.config().pricing,
        guest.id,
        &request.items,
        &request.shipping_info,
        request.payment_method,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the logged-in customer's orders, newest first.
#[instrument(skip(state), fields(customer_id = %customer.id))]
pub async fn index(
    RequireAuth(customer): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_customer(customer.id)
        .await?;

    Ok(Json(orders))
}

/// Get one of the logged-in customer's orders.
///
/// Ownership is enforced in the query: another customer's order id returns
/// 404, never the order data.
#[instrument(skip(state), fields(customer_id = %customer.id))]
pub async fn show(
    RequireAuth(customer): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .find_for_customer(OrderId::new(id), customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_owned()))?;

    Ok(Json(order))
}
