//! Admin order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use juniper_goods_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::db::orders::{DEFAULT_PER_PAGE, MAX_PER_PAGE, OrderListFilter, OrderSummary};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::Order;
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Paginated order listing response.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// List orders across all customers.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    let filter = OrderListFilter {
        status: query.status,
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    };

    let repo = OrderRepository::new(state.pool());
    let orders = repo.list(&filter).await?;
    let total = repo.count(&filter).await?;

    Ok(Json(OrderListResponse {
        orders,
        total,
        page: filter.page,
        per_page: filter.per_page.clamp(1, MAX_PER_PAGE),
    }))
}

/// Get a full order by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_owned()))?;

    Ok(Json(order))
}

/// Transition an order to a new status.
///
/// Illegal transitions, including any transition out of DELIVERED or
/// CANCELLED, are rejected with 400.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id, status = %request.status))]
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), request.status)
        .await?;

    Ok(Json(order))
}
