//! Product repository for database operations.
//!
//! Storefront queries only ever see active products; the admin binary has
//! its own repository that can see everything.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use juniper_goods_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Default page size for product listings.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Maximum page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    category_id: i32,
    name: String,
    slug: String,
    description: String,
    price: Decimal,
    inventory: i32,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            inventory: row.inventory,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Filter and pagination parameters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductListFilter {
    /// Restrict to a category by slug.
    pub category_slug: Option<String>,
    /// Case-insensitive substring match against name and description.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page (clamped to [`MAX_PER_PAGE`]).
    pub per_page: u32,
}

impl ProductListFilter {
    fn limit(&self) -> i64 {
        i64::from(self.per_page.clamp(1, MAX_PER_PAGE))
    }

    fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }

    /// Append the WHERE conditions shared by the list and count queries.
    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE p.active = TRUE");
        if let Some(slug) = &self.category_slug {
            qb.push(" AND c.slug = ").push_bind(slug.clone());
        }
        if let Some(q) = &self.search {
            let pattern = format!("%{q}%");
            qb.push(" AND (p.name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductListFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::new(
            "SELECT p.id, p.category_id, p.name, p.slug, p.description,
                    p.price, p.inventory, p.active, p.created_at, p.updated_at
             FROM product p
             JOIN category c ON c.id = p.category_id",
        );
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Count active products matching the filter (for pagination metadata).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &ProductListFilter) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::new(
            "SELECT COUNT(*)
             FROM product p
             JOIN category c ON c.id = p.category_id",
        );
        filter.push_conditions(&mut qb);

        let (count,): (i64,) = qb.build_query_as().fetch_one(self.pool).await?;
        Ok(count)
    }

    /// Get an active product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, category_id, name, slug, description,
                    price, inventory, active, created_at, updated_at
             FROM product
             WHERE slug = $1 AND active = TRUE",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }
}
