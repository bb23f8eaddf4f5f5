//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Catalog
//! GET  /categories             - Category listing
//! GET  /products               - Product listing (?category=&q=&page=&per_page=)
//! GET  /products/{slug}        - Product detail
//!
//! # Auth (rate limited)
//! POST /auth/register          - Create an account
//! POST /auth/login             - Log in
//! POST /auth/logout            - Log out
//!
//! # Orders (rate limited)
//! POST /orders                 - Place an order (requires auth)
//! POST /orders/guest           - Place an order as a guest
//! GET  /orders                 - List own orders (requires auth)
//! GET  /orders/{id}            - Order detail, owner-scoped (requires auth)
//! ```

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, checkout_rate_limiter};
use crate::state::AppState;

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(categories::index))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the order routes router.
///
/// The checkout limiter covers the whole group; placement is the expensive
/// path and the reads are per-customer anyway.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/guest", post(orders::create_guest))
        .route("/{id}", get(orders::show))
        .layer(checkout_rate_limiter())
}

/// Create the complete storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
}
