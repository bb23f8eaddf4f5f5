//! Order aggregate models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CustomerId, OrderId, OrderLineItemId, OrderStatus, PaymentMethod, ProductId};

/// A placed order with its line items.
///
/// The monetary fields are computed once at creation time and never
/// recomputed from current product prices.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub line_items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One product line within an order.
///
/// `unit_price` is captured at order time, decoupling historical orders from
/// future price changes. Reporting must read it from here, never by joining
/// to the current product price.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Structured shipping address stored on the order.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}
