use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, report, session},
    server::ScribeServer,
};

/// Create health check routes
pub fn health_routes() -> Router<ScribeServer> {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/version", get(health::version_info))
}

/// Create the live dictation session route
pub fn session_routes() -> Router<ScribeServer> {
    Router::new().route("/ws/voice-assistant", get(session::voice_session_handler))
}

/// Create report generation routes
pub fn report_routes() -> Router<ScribeServer> {
    Router::new().route("/generate-report", post(report::generate_report))
}

/// Combine all route groups into the application router
pub fn create_routes() -> Router<ScribeServer> {
    Router::new()
        .merge(health_routes())
        .merge(session_routes())
        .merge(report_routes())
}
