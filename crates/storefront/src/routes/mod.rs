//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Products (JSON)
//! GET  /products               - Product listing
//! POST /products               - Add a product (requires login)
//!
//! # Users (JSON)
//! POST /users/register         - Register an account
//! POST /users/login            - Login (sets the signed session cookie)
//! POST /users/logout           - Logout
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Slide-over panel
//! POST /cart/open              - Open the panel
//! POST /cart/close             - Close the panel
//! POST /cart/add               - Add item (returns badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns items fragment)
//! POST /cart/remove            - Remove item (returns items fragment)
//! GET  /cart/count             - Badge fragment
//! POST /cart/clear             - Empty the cart
//! POST /cart/checkout          - Demo checkout (422 on empty cart)
//! ```

pub mod cart;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::index).post(products::create))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/users", user_routes())
        .nest("/cart", cart_routes())
}
