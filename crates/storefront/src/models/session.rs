//! Session-stored types and keys.

use serde::{Deserialize, Serialize};

use juniper_goods_core::{CustomerId, CustomerRole};

/// Session storage keys.
pub mod session_keys {
    /// Key for the logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";
}

/// The logged-in customer, as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    pub id: CustomerId,
    pub email: String,
    pub role: CustomerRole,
}

impl From<&crate::models::Customer> for CurrentCustomer {
    fn from(customer: &crate::models::Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email.as_str().to_owned(),
            role: customer.role,
        }
    }
}
