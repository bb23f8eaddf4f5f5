//! Dashboard aggregate queries.
//!
//! Revenue sums come from order totals, never from current product prices,
//! so historical numbers survive price changes.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use juniper_goods_core::OrderStatus;

use super::RepositoryError;

/// Products with inventory strictly below this count as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Aggregated store metrics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    /// Order counts keyed by status.
    pub orders_by_status: Vec<StatusCount>,
    /// Sum of order totals, excluding cancelled orders.
    pub revenue_total: Decimal,
    /// Active products with inventory below [`LOW_STOCK_THRESHOLD`].
    pub low_stock_products: i64,
    /// All customer rows, guests included.
    pub customer_count: i64,
}

/// An order count for one status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

/// Load the dashboard metrics.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any query fails.
pub async fn load_metrics(pool: &PgPool) -> Result<DashboardMetrics, RepositoryError> {
    let status_rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM orders GROUP BY status ORDER BY status")
            .fetch_all(pool)
            .await?;

    let mut orders_by_status = Vec::with_capacity(status_rows.len());
    for (status, count) in status_rows {
        let status: OrderStatus = status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        orders_by_status.push(StatusCount { status, count });
    }

    let (revenue_total,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(total), 0) FROM orders WHERE status <> 'CANCELLED'",
    )
    .fetch_one(pool)
    .await?;

    let (low_stock_products,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM product WHERE active = TRUE AND inventory < $1",
    )
    .bind(LOW_STOCK_THRESHOLD)
    .fetch_one(pool)
    .await?;

    let (customer_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer")
        .fetch_one(pool)
        .await?;

    Ok(DashboardMetrics {
        orders_by_status,
        revenue_total,
        low_stock_products,
        customer_count,
    })
}
