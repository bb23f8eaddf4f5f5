//! Category repository for admin database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use juniper_goods_core::CategoryId;

use super::RepositoryError;
use crate::models::Category;

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for admin category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, created_at, updated_at FROM category ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Category, RepositoryError> {
        let row: CategoryRow = sqlx::query_as(
            "INSERT INTO category (name, slug)
             VALUES ($1, $2)
             RETURNING id, name, slug, created_at, updated_at",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Category::from(row))
    }

    /// Rename a category or change its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    pub async fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            "UPDATE category SET
                 name = COALESCE($2, name),
                 slug = COALESCE($3, slug),
                 updated_at = now()
             WHERE id = $1
             RETURNING id, name, slug, created_at, updated_at",
        )
        .bind(id.as_i32())
        .bind(name)
        .bind(slug)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("category slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.map(Category::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// Blocked while any product references it (foreign key RESTRICT);
    /// surfaced as a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if products still reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "category still has products assigned".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
