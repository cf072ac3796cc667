use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use extraction_engine::PatientRecord;

use crate::server::ScribeServer;

/// Render the posted record into a downloadable document
///
/// Invoked by the client once a session has ended; the body is the final
/// record JSON as last broadcast over the session socket.
pub async fn generate_report(
    State(server): State<ScribeServer>,
    Json(record): Json<PatientRecord>,
) -> Response {
    match server.renderer.render(&record) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, server.renderer.content_type().to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", server.renderer.file_name()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "report rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render report").into_response()
        }
    }
}
