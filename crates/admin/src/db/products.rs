//! Product repository for admin database operations.
//!
//! Unlike the storefront repository, this one sees inactive products and
//! owns every write path except checkout's inventory decrement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use juniper_goods_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::Product;

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

const PRODUCT_COLUMNS: &str = "id, category_id, name, slug, description, price, inventory, \
     active, created_at, updated_at";

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub inventory: i32,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

/// Filter parameters for admin product listings.
#[derive(Debug, Clone, Default)]
pub struct AdminProductFilter {
    /// Include inactive products (default: true for admin).
    pub include_inactive: bool,
    /// Only products with inventory strictly below this.
    pub low_stock_below: Option<i32>,
}

/// Repository for admin product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &AdminProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE TRUE"
        ));
        if !filter.include_inactive {
            qb.push(" AND active = TRUE");
        }
        if let Some(threshold) = filter.low_stock_below {
            qb.push(" AND inventory < ").push_bind(threshold);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID (active or not).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateProductInput) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO product (category_id, name, slug, description, price, inventory)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.category_id.as_i32())
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.inventory)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Product::from(row))
    }

    /// Update a product's metadata. Inventory is changed only via
    /// [`Self::restock`] or checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET
                 category_id = COALESCE($2, category_id),
                 name        = COALESCE($3, name),
                 slug        = COALESCE($4, slug),
                 description = COALESCE($5, description),
                 price       = COALESCE($6, price),
                 active      = COALESCE($7, active),
                 updated_at  = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(input.category_id.map(|c| c.as_i32()))
        .bind(input.name.as_deref())
        .bind(input.slug.as_deref())
        .bind(input.description.as_deref())
        .bind(input.price)
        .bind(input.active)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Soft-delete a product by clearing its active flag.
    ///
    /// Products referenced by orders are never hard-deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn deactivate(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET active = FALSE, updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Add stock to a product (the compensating action for checkout's
    /// decrement).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `quantity` is not positive.
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn restock(&self, id: ProductId, quantity: i32) -> Result<Product, RepositoryError> {
        if quantity <= 0 {
            return Err(RepositoryError::Conflict(
                "restock quantity must be positive".to_owned(),
            ));
        }

        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE product SET inventory = inventory + $2, updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }
}
