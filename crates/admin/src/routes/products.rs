//! Admin product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use juniper_goods_core::{CategoryId, ProductId};

use crate::db::ProductRepository;
use crate::db::products::{AdminProductFilter, CreateProductInput, UpdateProductInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the admin product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Include inactive products (default true).
    pub include_inactive: Option<bool>,
    /// Only products with inventory strictly below this.
    pub low_stock: Option<i32>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub inventory: i32,
}

/// Request body for updating a product. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProductRequest {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

/// Request body for restocking a product.
#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i32,
}

/// List products, inactive ones included by default.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = AdminProductFilter {
        include_inactive: query.include_inactive.unwrap_or(true),
        low_stock_below: query.low_stock,
    };

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Get a product by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_owned()))?;

    Ok(Json(product))
}

/// Create a product.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id, slug = %request.slug))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if request.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    if request.inventory < 0 {
        return Err(AppError::BadRequest(
            "inventory must not be negative".to_owned(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .create(&CreateProductInput {
            category_id: request.category_id,
            name: request.name,
            slug: request.slug,
            description: request.description,
            price: request.price,
            inventory: request.inventory,
        })
        .await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product's metadata.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if matches!(request.price, Some(p) if p < Decimal::ZERO) {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .update(
            ProductId::new(id),
            &UpdateProductInput {
                category_id: request.category_id,
                name: request.name,
                slug: request.slug,
                description: request.description,
                price: request.price,
                active: request.active,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Deactivate a product (soft delete).
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn deactivate(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .deactivate(ProductId::new(id))
        .await?;

    tracing::info!(product_id = %product.id, "Product deactivated");

    Ok(Json(product))
}

/// Add stock to a product.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id))]
pub async fn restock(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<RestockRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .restock(ProductId::new(id), request.quantity)
        .await?;

    tracing::info!(
        product_id = %product.id,
        quantity = request.quantity,
        inventory = product.inventory,
        "Product restocked"
    );

    Ok(Json(product))
}
