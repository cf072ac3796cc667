use axum::{extract::State, response::Json};
use serde::Serialize;
use std::collections::HashMap;

use crate::server::ScribeServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// Service banner response for the root route
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub ai_provider: String,
    pub started_at: String,
}

/// Root route handler
pub async fn service_info(State(server): State<ScribeServer>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_provider: server.provider_name().to_string(),
        started_at: server.config.started_at.to_rfc3339(),
    })
}

/// Health check handler
pub async fn health_check(State(server): State<ScribeServer>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    checks.insert("heuristic_extractor".to_string(), "ok".to_string());
    checks.insert("ai_provider".to_string(), server.provider_name().to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    })
}

/// Version info handler
pub async fn version_info() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
