//! Admin dashboard route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::dashboard::{DashboardMetrics, load_metrics};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Store metrics: order counts by status, revenue, low stock, customers.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>> {
    let metrics = load_metrics(state.pool()).await?;
    Ok(Json(metrics))
}
