//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::{Customer, CurrentCustomer};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new customer account and log it in.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Customer>)> {
    let customer = AuthService::new(state.pool())
        .register(
            &request.email,
            &request.password,
            &request.first_name,
            &request.last_name,
        )
        .await?;

    set_current_customer(&session, &CurrentCustomer::from(&customer))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(customer_id = %customer.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(customer)))
}

/// Log in with email and password.
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Customer>> {
    let customer = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    set_current_customer(&session, &CurrentCustomer::from(&customer))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(customer_id = %customer.id, "Customer logged in");

    Ok(Json(customer))
}

/// Log out the current session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_customer(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    Ok(Json(json!({ "ok": true })))
}
