//! Guest identity resolution for unauthenticated checkout.
//!
//! Guest checkout still produces a real customer row so an order always
//! references exactly one customer. Repeat guest checkouts are not
//! deduplicated: every one creates a fresh row, flagged `is_guest`.

use sqlx::PgPool;
use uuid::Uuid;

use juniper_goods_core::Email;

use crate::db::CustomerRepository;
use crate::models::Customer;
use crate::services::checkout::{CheckoutError, ShippingInfo, validate_shipping};

/// Resolve a guest identity from checkout contact information.
///
/// Validates the contact fields (name, email, phone with 10-15 digits) and
/// creates a customer row with a generated unique placeholder email.
///
/// # Errors
///
/// Returns `CheckoutError::Validation` for missing or malformed contact
/// fields, `CheckoutError::Repository` on database failure.
pub async fn resolve_guest(
    pool: &PgPool,
    shipping: &ShippingInfo,
) -> Result<Customer, CheckoutError> {
    let address = validate_shipping(shipping)?;

    // The shopper's real email goes on the order's shipping contact; the
    // account row gets a placeholder so repeat guests never collide with a
    // registered account or each other.
    let placeholder = format!("guest-{}@guest.invalid", Uuid::new_v4().simple());
    let email = Email::parse(&placeholder)
        .map_err(|e| CheckoutError::Validation(format!("generated guest email invalid: {e}")))?;

    let customer = CustomerRepository::new(pool)
        .create_guest(&email, &address.first_name, &address.last_name, &address.phone)
        .await?;

    tracing::info!(customer_id = %customer.id, "Guest customer created");

    Ok(customer)
}
