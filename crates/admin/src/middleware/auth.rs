//! Authentication middleware and extractors for admin.
//!
//! Provides extractors for requiring admin authentication in route handlers.
//! The role checks live on `CustomerRole` so every endpoint shares the same
//! predicate instead of reimplementing it.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires admin authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required.
pub enum AdminAuthRejection {
    /// No admin session.
    Unauthorized,
    /// Logged in, but the role doesn't permit the resource.
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "admin authentication required"})),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({"error": "only super admins can access this resource"})),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        // Stale sessions from a demoted account don't keep their access.
        if !admin.role.is_staff() {
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Extractor that requires super admin authentication.
///
/// Returns 401 without a session, 403 for an admin who is not a super admin.
pub struct RequireSuperAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAdminAuth(admin) = RequireAdminAuth::from_request_parts(parts, state).await?;

        if !admin.role.is_super_admin() {
            return Err(AdminAuthRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// Cycles the session ID to prevent session fixation.
///
/// # Errors
///
/// Returns a session error if the store write fails.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_ADMIN, admin.clone())
        .await
}

/// Helper to clear the current admin from the session.
///
/// # Errors
///
/// Returns a session error if the store write fails.
pub async fn clear_current_admin(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .map(|_| ())
}
