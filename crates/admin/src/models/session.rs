//! Session-stored types and keys.

use serde::{Deserialize, Serialize};

use juniper_goods_core::{CustomerId, CustomerRole};

/// Session storage keys.
pub mod session_keys {
    /// Key for the logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The logged-in admin, as stored in the session.
///
/// Only customers whose role passes `CustomerRole::is_staff` ever end up
/// here; the login handler enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: CustomerId,
    pub email: String,
    pub role: CustomerRole,
}

impl From<&crate::models::Customer> for CurrentAdmin {
    fn from(customer: &crate::models::Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email.as_str().to_owned(),
            role: customer.role,
        }
    }
}
