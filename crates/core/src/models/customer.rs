//! Customer model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{CustomerId, CustomerRole, Email};

/// A customer account.
///
/// Guests are full customer rows synthesized at checkout with a generated
/// placeholder email and `is_guest` set; ownership of an order always
/// resolves to exactly one customer row.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: CustomerRole,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
