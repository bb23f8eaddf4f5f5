//! Admin authentication route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, Customer};
use crate::services::auth;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in as an admin.
///
/// Only accounts whose role is `admin` or `super_admin` may establish an
/// admin session; everyone else gets 403 even with a correct password.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Customer>> {
    let customer = auth::login(state.pool(), &request.email, &request.password).await?;

    set_current_admin(&session, &CurrentAdmin::from(&customer))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(admin_id = %customer.id, role = %customer.role, "Admin logged in");

    Ok(Json(customer))
}

/// Log out the current admin session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    Ok(Json(json!({ "ok": true })))
}
