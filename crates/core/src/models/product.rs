//! Product model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CategoryId, ProductId};

/// A catalog product.
///
/// `inventory` is decremented only by successful order placement and
/// restocked by admin action; the database enforces it never goes negative.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub inventory: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
