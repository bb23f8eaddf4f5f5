//! Order repository for database operations.
//!
//! Order creation happens inside the checkout transaction (see
//! `services::checkout`), so [`create_order`] takes the transaction's
//! connection rather than the pool. Reads go through [`OrderRepository`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use juniper_goods_core::{
    CustomerId, OrderId, OrderLineItemId, OrderStatus, PaymentMethod, ProductId,
};

use super::RepositoryError;
use crate::models::{Order, OrderLineItem, ShippingAddress};

/// A fully-priced order ready to persist.
///
/// Produced by the checkout service after reservation and pricing; the unit
/// prices here were captured by the reservation step, never taken from the
/// client.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub line_items: Vec<DraftLineItem>,
}

/// One line of an [`OrderDraft`].
#[derive(Debug, Clone)]
pub struct DraftLineItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Internal row type for order queries.
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
        let payment_method: PaymentMethod = self
            .payment_method
            .parse()
            .unwrap_or(PaymentMethod::Other);

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
    order_id: i32,
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

/// Persist an order and its line items on the given connection.
///
/// Called from inside the checkout transaction so the inserts commit (or
/// roll back) together with the inventory decrements.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any insert fails.
pub async fn create_order(
    conn: &mut PgConnection,
    draft: &OrderDraft,
) -> Result<Order, RepositoryError> {
    let row: OrderRow = sqlx::query_as(&format!(
        "INSERT INTO orders (customer_id, status, payment_method, subtotal, shipping_fee,
                             tax, total, ship_first_name, ship_last_name, ship_email,
                             ship_phone, ship_street, ship_city, ship_state,
                             ship_postal_code, ship_country)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(draft.customer_id.as_i32())
    .bind(OrderStatus::Pending.to_string())
    .bind(draft.payment_method.to_string())
    .bind(draft.subtotal)
    .bind(draft.shipping_fee)
    .bind(draft.tax)
    .bind(draft.total)
    .bind(&draft.shipping_address.first_name)
    .bind(&draft.shipping_address.last_name)
    .bind(&draft.shipping_address.email)
    .bind(&draft.shipping_address.phone)
    .bind(&draft.shipping_address.street)
    .bind(&draft.shipping_address.city)
    .bind(&draft.shipping_address.state)
    .bind(&draft.shipping_address.postal_code)
    .bind(&draft.shipping_address.country)
    .fetch_one(&mut *conn)
    .await?;

    let mut line_items = Vec::with_capacity(draft.line_items.len());
    for item in &draft.line_items {
        let item_row: LineItemRow = sqlx::query_as(
            "INSERT INTO order_line_item (order_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4)
             RETURNING id, order_id, product_id, quantity, unit_price",
        )
        .bind(row.id)
        .bind(item.product_id.as_i32())
        .bind(item.quantity)
        .bind(item.unit_price)
        .fetch_one(&mut *conn)
        .await?;
        line_items.push(OrderLineItem::from(item_row));
    }

    row.into_order(line_items)
}

/// Repository for order read operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by ID, scoped to its owner.
    ///
    /// The ownership check happens in SQL: an order belonging to a different
    /// customer is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_customer(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND customer_id = $2"
        ))
        .bind(order_id.as_i32())
        .bind(customer_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.line_items_for(&[row.id]).await?;
        let line_items = items.into_values().next().unwrap_or_default();
        row.into_order(line_items).map(Some)
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE customer_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(customer_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut items_by_order = self.line_items_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    /// Fetch line items for a set of orders, grouped by order id.
    async fn line_items_for(
        &self,
        order_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<OrderLineItem>>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<LineItemRow> = sqlx::query_as(
            "SELECT id, order_id, product_id, quantity, unit_price
             FROM order_line_item
             WHERE order_id = ANY($1)
             ORDER BY id",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<i32, Vec<OrderLineItem>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.order_id)
                .or_default()
                .push(OrderLineItem::from(row));
        }
        Ok(grouped)
    }
}
