//! HTTP API server for the curio catalog service.
//!
//! This crate provides the HTTP glue around the core stores:
//! - Item submission (multipart form) and retrieval endpoints
//! - Image serving with sentinel fallback
//! - CORS restricted to the configured front-end origin
//! - Request tracing and health checks

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use service::CatalogService;
pub use state::AppState;
