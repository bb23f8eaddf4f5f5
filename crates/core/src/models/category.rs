//! Category model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
