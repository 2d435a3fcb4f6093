//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Only the configured front-end origin may call the API; the method
    // list matches what the original front-end negotiates.
    let cors = CorsLayer::new()
        .allow_origin(state.front_origin.clone())
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE]);

    Router::new()
        .route("/", get(handlers::root))
        // Health check (intentionally unauthenticated for probes)
        .route("/health", get(handlers::health_check))
        // Catalog endpoints
        .route("/items", post(handlers::add_item).get(handlers::list_items))
        .route("/items/{id}", get(handlers::get_item))
        .route("/search", get(handlers::search_items))
        // Image read path
        .route("/image/{image_filename}", get(handlers::get_image))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
