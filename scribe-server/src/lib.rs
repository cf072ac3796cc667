//! Scribe Server - live clinical dictation API
//!
//! This library provides the HTTP/WebSocket surface around the extraction
//! engine: the per-connection voice session loop, report generation, and
//! health endpoints.

pub mod handlers;
pub mod middleware;
pub mod report;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use server::{ScribeServer, ServerConfig};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: ScribeServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer()),
        )
        .with_state(server)
}
