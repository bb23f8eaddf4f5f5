//! Admin customer route handlers.
//!
//! Viewing customers requires any staff role; changing a customer's role is
//! super-admin only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use juniper_goods_core::{CustomerId, CustomerRole};

use crate::db::CustomerRepository;
use crate::db::customers::DEFAULT_PER_PAGE;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::Customer;
use crate::state::AppState;

/// Query parameters for the customer listing.
#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request body for a role change.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: CustomerRole,
}

/// List customers, newest first.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.pool())
        .list(
            query.page.unwrap_or(1).max(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?;

    Ok(Json(customers))
}

/// Get a customer by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>> {
    let customer = CustomerRepository::new(state.pool())
        .get_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("customer".to_owned()))?;

    Ok(Json(customer))
}

/// Change a customer's role.
///
/// Super-admin only. Guests can't be promoted; they have no credentials.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id, role = %request.role))]
pub async fn set_role(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<Customer>> {
    let repo = CustomerRepository::new(state.pool());

    let target = repo
        .get_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("customer".to_owned()))?;

    if target.is_guest && request.role.is_staff() {
        return Err(AppError::BadRequest(
            "guest accounts cannot be given a staff role".to_owned(),
        ));
    }

    let customer = repo.set_role(target.id, request.role).await?;

    tracing::info!(customer_id = %customer.id, new_role = %customer.role, "Customer role changed");

    Ok(Json(customer))
}
