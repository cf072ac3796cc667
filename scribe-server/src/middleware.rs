use tower_http::cors::{Any, CorsLayer};

/// Create CORS layer for the application
///
/// The session client is a browser widget served from arbitrary clinic
/// origins, so the layer stays permissive. Nothing here carries credentials.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
