//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::db::products::{DEFAULT_PER_PAGE, ProductListFilter};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Restrict to a category by slug.
    pub category: Option<String>,
    /// Substring search against name and description.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Paginated product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// List active products with filtering and pagination.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let filter = ProductListFilter {
        category_slug: query.category.filter(|s| !s.is_empty()),
        search: query.q.filter(|s| !s.is_empty()),
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    };

    let repo = ProductRepository::new(state.pool());
    let products = repo.list(&filter).await?;
    let total = repo.count(&filter).await?;

    Ok(Json(ProductListResponse {
        products,
        total,
        page: filter.page,
        per_page: filter.per_page.clamp(1, crate::db::products::MAX_PER_PAGE),
    }))
}

/// Get an active product by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_owned()))?;

    Ok(Json(product))
}
