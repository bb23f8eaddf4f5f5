//! Order repository for admin database operations.
//!
//! Admin is the only actor permitted to change order status. Transitions are
//! validated against the state machine under `SELECT ... FOR UPDATE`, so
//! concurrent updates serialize and terminal states stay terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;

use juniper_goods_core::{CustomerId, OrderId, OrderLineItemId, OrderStatus, PaymentMethod, ProductId};

use super::RepositoryError;
use crate::models::{Order, OrderLineItem, ShippingAddress};

/// Default page size for order listings.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Maximum page size a client may request.
pub const MAX_PER_PAGE: u32 = 200;

/// Errors from a status update.
#[derive(Debug, Error)]
pub enum StatusUpdateError {
    /// No order with that id.
    #[error("order not found")]
    NotFound,

    /// The requested transition is not legal (including any transition out
    /// of DELIVERED or CANCELLED).
    #[error("cannot transition order from {from} to {to}")]
    IllegalTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Filter and pagination parameters for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page (clamped to [`MAX_PER_PAGE`]).
    pub per_page: u32,
}

impl OrderListFilter {
    fn limit(&self) -> i64 {
        i64::from(self.per_page.clamp(1, MAX_PER_PAGE))
    }

    fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }
}

/// A compact order view for list pages (no line items or address).
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internal row type for order summaries.
#[derive(Debug, sqlx::FromRow)]
struct OrderSummaryRow {
    id: i32,
    customer_id: i32,
    status: String,
    payment_method: String,
    total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderSummaryRow> for OrderSummary {
    type Error = RepositoryError;

    fn try_from(row: OrderSummaryRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let payment_method: PaymentMethod =
            row.payment_method.parse().unwrap_or(PaymentMethod::Other);

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            status,
            payment_method,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for full order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    status: String,
    payment_method: String,
    subtotal: Decimal,
    shipping_fee: Decimal,
    tax: Decimal,
    total: Decimal,
    ship_first_name: String,
    ship_last_name: String,
    ship_email: String,
    ship_phone: String,
    ship_street: String,
    ship_city: String,
    ship_state: String,
    ship_postal_code: String,
    ship_country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, line_items: Vec<OrderLineItem>) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let payment_method: PaymentMethod =
            self.payment_method.parse().unwrap_or(PaymentMethod::Other);

        Ok(Order {
            id: OrderId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            status,
            payment_method,
            subtotal: self.subtotal,
            shipping_fee: self.shipping_fee,
            tax: self.tax,
            total: self.total,
            shipping_address: ShippingAddress {
                first_name: self.ship_first_name,
                last_name: self.ship_last_name,
                email: self.ship_email,
                phone: self.ship_phone,
                street: self.ship_street,
                city: self.ship_city,
                state: self.ship_state,
                postal_code: self.ship_postal_code,
                country: self.ship_country,
            },
            line_items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for line item queries.
#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
}

impl From<LineItemRow> for OrderLineItem {
    fn from(row: LineItemRow) -> Self {
        Self {
            id: OrderLineItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

const ORDER_COLUMNS: &str = "id, customer_id, status, payment_method, subtotal, shipping_fee, \
     tax, total, ship_first_name, ship_last_name, ship_email, ship_phone, ship_street, \
     ship_city, ship_state, ship_postal_code, ship_country, created_at, updated_at";

/// Repository for admin order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders across all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &OrderListFilter,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, customer_id, status, payment_method, total, created_at, updated_at
             FROM orders WHERE TRUE",
        );
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.to_string());
        }
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows: Vec<OrderSummaryRow> = qb.build_query_as().fetch_all(self.pool).await?;
        rows.into_iter().map(OrderSummary::try_from).collect()
    }

    /// Count orders matching the filter (for pagination metadata).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &OrderListFilter) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM orders WHERE TRUE");
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.to_string());
        }

        let (count,): (i64,) = qb.build_query_as().fetch_one(self.pool).await?;
        Ok(count)
    }

    /// Get a full order by id, with line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<LineItemRow> = sqlx::query_as(
            "SELECT id, product_id, quantity, unit_price
             FROM order_line_item
             WHERE order_id = $1
             ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        row.into_order(items.into_iter().map(OrderLineItem::from).collect())
            .map(Some)
    }

    /// Transition an order to a new status.
    ///
    /// The current status is read under `FOR UPDATE` and the transition is
    /// validated against the state machine before the write, so concurrent
    /// updates serialize and no transition ever leaves a terminal state.
    ///
    /// # Errors
    ///
    /// Returns `StatusUpdateError::NotFound` for an unknown id,
    /// `StatusUpdateError::IllegalTransition` for a rejected transition, and
    /// `StatusUpdateError::Repository` on database failure.
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, StatusUpdateError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(RepositoryError::Database)?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id.as_i32())
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::Database)?;

        let Some((current,)) = current else {
            return Err(StatusUpdateError::NotFound);
        };
        let current: OrderStatus = current.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        if !current.can_transition_to(new_status) {
            // Dropping the transaction releases the row lock.
            drop(tx);
            return Err(StatusUpdateError::IllegalTransition {
                from: current,
                to: new_status,
            });
        }

        let row: OrderRow = sqlx::query_as(&format!(
            "UPDATE orders SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(new_status.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::Database)?;

        tx.commit().await.map_err(RepositoryError::Database)?;

        let items: Vec<LineItemRow> = sqlx::query_as(
            "SELECT id, product_id, quantity, unit_price
             FROM order_line_item
             WHERE order_id = $1
             ORDER BY id",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await
        .map_err(RepositoryError::Database)?;

        tracing::info!(order_id = %id, from = %current, to = %new_status, "Order status updated");

        Ok(row.into_order(items.into_iter().map(OrderLineItem::from).collect())?)
    }
}
