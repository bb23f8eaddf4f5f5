//! Order placement: validation, inventory reservation, pricing, persistence.
//!
//! The whole flow for one order runs inside a single database transaction.
//! Each line item is reserved with a conditional decrement
//! (`... AND inventory >= quantity`); a miss aborts the transaction, so
//! either every decrement and the order row commit together or nothing does.
//! Two concurrent checkouts racing for the last unit resolve
//! deterministically: exactly one commits, the other observes insufficient
//! stock.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;

use juniper_goods_core::{CustomerId, Email, PaymentMethod, Phone, ProductId};

use crate::config::PricingConfig;
use crate::db::orders::{DraftLineItem, OrderDraft, create_order};
use crate::db::RepositoryError;
use crate::models::{Order, ShippingAddress};
use crate::services::pricing::{PricedLine, PricingError};

/// A cart line as submitted by the client.
///
/// Client carts are untrusted: only product id and quantity are read; the
/// unit price is always re-derived server-side during reservation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Shipping and contact information submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingInfo {
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

/// A line item with its availability verified and unit price captured.
#[derive(Debug, Clone)]
pub struct ReservedLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Errors from order placement.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart contains no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// Missing or malformed checkout input.
    #[error("{0}")]
    Validation(String),

    /// A referenced product does not exist or is inactive.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Not enough inventory for a requested quantity.
    #[error("insufficient stock for product {product_id}: {available} available, {requested} requested")]
    InsufficientStock {
        product_id: ProductId,
        available: i32,
        requested: i32,
    },

    /// Totals computation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Place an order: reserve inventory, price it, persist it.
///
/// The unit prices on the created order are the ones captured during
/// reservation, never the client's.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart,
/// `CheckoutError::Validation` for bad shipping input or quantities,
/// `CheckoutError::ProductNotFound` / `CheckoutError::InsufficientStock`
/// when reservation fails, and `CheckoutError::Repository` on database
/// failure. On any error, no inventory is decremented and no order exists.
pub async fn place_order(
    pool: &PgPool,
    pricing: &PricingConfig,
    customer_id: CustomerId,
    items: &[CartItem],
    shipping: &ShippingInfo,
    payment_method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    let merged = merge_items(items)?;
    if merged.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let shipping_address = validate_shipping(shipping)?;

    let mut tx = pool.begin().await.map_err(RepositoryError::Database)?;

    let reserved = match reserve(&mut *tx, &merged).await {
        Ok(reserved) => reserved,
        Err(err) => {
            // Dropping the transaction rolls back any decrements already applied.
            drop(tx);
            return Err(err);
        }
    };

    let priced: Vec<PricedLine> = reserved
        .iter()
        .map(|line| PricedLine {
            unit_price: line.unit_price,
            quantity: line.quantity,
        })
        .collect();
    let totals = pricing.compute_totals(&priced)?;

    let draft = OrderDraft {
        customer_id,
        payment_method,
        subtotal: totals.subtotal,
        shipping_fee: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        shipping_address,
        line_items: reserved
            .iter()
            .map(|line| DraftLineItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect(),
    };

    let order = match create_order(&mut *tx, &draft).await {
        Ok(order) => order,
        Err(err) => {
            drop(tx);
            return Err(err.into());
        }
    };

    tx.commit().await.map_err(RepositoryError::Database)?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %customer_id,
        total = %order.total,
        line_items = order.line_items.len(),
        "Order placed"
    );

    Ok(order)
}

/// Reserve inventory for every merged cart line.
///
/// Each decrement is conditional on sufficient stock; the first miss is
/// diagnosed (missing/inactive product vs. insufficient stock) and returned,
/// leaving the caller to abort the transaction.
async fn reserve(
    conn: &mut PgConnection,
    items: &[CartItem],
) -> Result<Vec<ReservedLine>, CheckoutError> {
    #[derive(sqlx::FromRow)]
    struct ReservedRow {
        name: String,
        price: Decimal,
    }

    let mut reserved = Vec::with_capacity(items.len());
    for item in items {
        let row: Option<ReservedRow> = sqlx::query_as(
            "UPDATE product
             SET inventory = inventory - $2, updated_at = now()
             WHERE id = $1 AND active = TRUE AND inventory >= $2
             RETURNING name, price",
        )
        .bind(item.product_id.as_i32())
        .bind(item.quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::Database)?;

        match row {
            Some(row) => reserved.push(ReservedLine {
                product_id: item.product_id,
                name: row.name,
                quantity: item.quantity,
                unit_price: row.price,
            }),
            None => return Err(diagnose_miss(conn, item).await?),
        }
    }

    Ok(reserved)
}

/// Work out why a conditional decrement matched no row.
async fn diagnose_miss(
    conn: &mut PgConnection,
    item: &CartItem,
) -> Result<CheckoutError, RepositoryError> {
    let available: Option<(i32,)> =
        sqlx::query_as("SELECT inventory FROM product WHERE id = $1 AND active = TRUE")
            .bind(item.product_id.as_i32())
            .fetch_optional(&mut *conn)
            .await?;

    Ok(match available {
        Some((available,)) => CheckoutError::InsufficientStock {
            product_id: item.product_id,
            available,
            requested: item.quantity,
        },
        None => CheckoutError::ProductNotFound(item.product_id),
    })
}

/// Merge duplicate product lines and validate quantities.
///
/// The submitted cart may mention the same product twice; summing first
/// means one conditional decrement runs per product, so the availability
/// check covers the combined quantity.
fn merge_items(items: &[CartItem]) -> Result<Vec<CartItem>, CheckoutError> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity <= 0 {
            return Err(CheckoutError::Validation(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(*item),
        }
    }
    Ok(merged)
}

/// Validate shipping input and normalize its email and phone.
pub(crate) fn validate_shipping(info: &ShippingInfo) -> Result<ShippingAddress, CheckoutError> {
    let required = [
        ("first_name", &info.first_name),
        ("last_name", &info.last_name),
        ("street", &info.street),
        ("city", &info.city),
        ("state", &info.state),
        ("postal_code", &info.postal_code),
        ("country", &info.country),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::Validation(format!("{field} is required")));
        }
    }

    let email = Email::parse(info.email.trim())
        .map_err(|e| CheckoutError::Validation(format!("invalid email: {e}")))?;
    let phone = Phone::parse(&info.phone)
        .map_err(|e| CheckoutError::Validation(format!("invalid phone: {e}")))?;

    Ok(ShippingAddress {
        first_name: info.first_name.trim().to_owned(),
        last_name: info.last_name.trim().to_owned(),
        email: email.into_inner(),
        phone: phone.into_inner(),
        street: info.street.trim().to_owned(),
        city: info.city.trim().to_owned(),
        state: info.state.trim().to_owned(),
        postal_code: info.postal_code.trim().to_owned(),
        country: info.country.trim().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: "(555) 123-4567".to_owned(),
            street: "1 Analytical Way".to_owned(),
            city: "London".to_owned(),
            state: "LDN".to_owned(),
            postal_code: "E1 6AN".to_owned(),
            country: "GB".to_owned(),
        }
    }

    #[test]
    fn test_merge_sums_duplicate_products() {
        let merged =
            merge_items(&[item(1, 2), item(2, 1), item(1, 3)]).expect("valid quantities");
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].product_id, ProductId::new(1));
        assert_eq!(merged[0].quantity, 5);
        assert_eq!(merged[1].product_id, ProductId::new(2));
        assert_eq!(merged[1].quantity, 1);
    }

    #[test]
    fn test_merge_rejects_non_positive_quantity() {
        assert!(matches!(
            merge_items(&[item(1, 0)]),
            Err(CheckoutError::Validation(_))
        ));
        assert!(matches!(
            merge_items(&[item(1, 2), item(2, -1)]),
            Err(CheckoutError::Validation(_))
        ));
    }

    #[test]
    fn test_merge_empty_stays_empty() {
        assert!(merge_items(&[]).expect("empty is fine").is_empty());
    }

    #[test]
    fn test_validate_shipping_normalizes_phone() {
        let address = validate_shipping(&shipping()).expect("valid input");
        assert_eq!(address.phone, "5551234567");
        assert_eq!(address.email, "ada@example.com");
    }

    #[test]
    fn test_validate_shipping_missing_field() {
        let mut info = shipping();
        info.city = "  ".to_owned();
        let err = validate_shipping(&info).expect_err("city missing");
        assert!(matches!(err, CheckoutError::Validation(ref msg) if msg.contains("city")));
    }

    #[test]
    fn test_validate_shipping_bad_phone() {
        let mut info = shipping();
        info.phone = "12345".to_owned();
        assert!(matches!(
            validate_shipping(&info),
            Err(CheckoutError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_shipping_bad_email() {
        let mut info = shipping();
        info.email = "not-an-email".to_owned();
        assert!(matches!(
            validate_shipping(&info),
            Err(CheckoutError::Validation(_))
        ));
    }
}
