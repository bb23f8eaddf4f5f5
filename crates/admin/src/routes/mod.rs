//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/login                 - Admin login (staff roles only)
//! POST /auth/logout                - Log out
//!
//! # Products (admin)
//! GET    /products                 - Listing (?include_inactive=&low_stock=)
//! POST   /products                 - Create
//! GET    /products/{id}            - Detail
//! PUT    /products/{id}            - Update metadata
//! DELETE /products/{id}            - Deactivate (soft delete)
//! POST   /products/{id}/restock    - Add inventory
//!
//! # Categories (admin)
//! GET    /categories               - Listing
//! POST   /categories               - Create
//! PUT    /categories/{id}          - Update
//! DELETE /categories/{id}          - Delete (409 while products reference it)
//!
//! # Orders (admin)
//! GET  /orders                     - Listing (?status=&page=&per_page=)
//! GET  /orders/{id}                - Detail with line items
//! PUT  /orders/{id}/status         - Transition status
//!
//! # Customers (admin; role change is super-admin only)
//! GET  /customers                  - Listing (?page=&per_page=)
//! GET  /customers/{id}             - Detail
//! PUT  /customers/{id}/role        - Change role (super admin)
//!
//! # Dashboard
//! GET  /dashboard                  - Store metrics
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the complete admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::deactivate),
        )
        .route("/products/{id}/restock", post(products::restock))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::destroy),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/customers", get(customers::index))
        .route("/customers/{id}", get(customers::show))
        .route("/customers/{id}/role", put(customers::set_role))
        .route("/dashboard", get(dashboard::show))
}
