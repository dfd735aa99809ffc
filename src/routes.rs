use axum::routing::{delete, get, post};
use axum::{middleware as axum_middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{bids, products, system, users};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Public CRUD
        .merge(public_routes())
        // Auth-gated bidding
        .merge(bid_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create))
        .route("/products", get(products::list).post(products::create))
        .route("/latest-products", get(products::latest))
        .route("/all-products", get(products::all))
        // Static segment registered alongside /products/:id; the router
        // prefers the literal match.
        .route("/products/bids/:product_id", get(products::bids))
        .route("/products/:id", get(products::show))
}

fn bid_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bids", get(bids::list).post(bids::place))
        .route("/bids/:id", delete(bids::remove))
        .layer(axum_middleware::from_fn_with_state(state, require_auth))
}
