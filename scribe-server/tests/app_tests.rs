use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use extraction_engine::EngineConfig;
use scribe_server::{create_app, ScribeServer};

/// App wired without an AI provider; the heuristic path must carry sessions
fn test_app() -> Router {
    let server = ScribeServer::new(EngineConfig::default()).expect("failed to create test server");
    create_app(server)
}

#[tokio::test]
async fn test_health_reports_disabled_ai_provider() {
    let app = test_app();

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["checks"]["ai_provider"], "disabled");
    assert_eq!(health["checks"]["heuristic_extractor"], "ok");
}

#[tokio::test]
async fn test_root_returns_service_banner() {
    let app = test_app();

    let request = Request::builder()
        .uri("/")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let info: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["service"], "Scribe Engine");
}

#[tokio::test]
async fn test_generate_report_returns_attachment() {
    let app = test_app();

    let record = json!({
        "patient_name": "Asha",
        "age": "30",
        "gender": "Female",
        "symptoms": ["fever"],
        "diagnosis": "Viral fever",
        "medicines": [
            {"name": "Paracetamol", "dose": "500 mg", "frequency": "Twice daily", "duration": null}
        ],
        "medical_tests": []
    });

    let request = Request::builder()
        .uri("/generate-report")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(record.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("attachment"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Patient Name: Asha"));
    assert!(text.contains("Diagnosis: Viral fever"));
}

#[tokio::test]
async fn test_report_accepts_sparse_record_json() {
    let app = test_app();

    // Clients may post exactly what the last DATA_UPDATE carried, including
    // null scalars and missing list fields.
    let request = Request::builder()
        .uri("/generate-report")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"patient_name": null, "symptoms": ["cough"]}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
