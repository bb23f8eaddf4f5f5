//! Admin category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use juniper_goods_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::Category;
use crate::state::AppState;

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
}

/// Request body for updating a category. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// List all categories.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Create a category.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id, slug = %request.slug))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    if request.name.trim().is_empty() || request.slug.trim().is_empty() {
        return Err(AppError::BadRequest("name and slug are required".to_owned()));
    }

    let category = CategoryRepository::new(state.pool())
        .create(request.name.trim(), request.slug.trim())
        .await?;

    tracing::info!(category_id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
#[instrument(skip(admin, state, request), fields(admin_id = %admin.id))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .update(
            CategoryId::new(id),
            request.name.as_deref(),
            request.slug.as_deref(),
        )
        .await?;

    Ok(Json(category))
}

/// Delete a category.
///
/// Returns 409 while any product still references it.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn destroy(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    tracing::info!(category_id = id, "Category deleted");

    Ok(Json(json!({ "ok": true })))
}
