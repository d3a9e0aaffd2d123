use crate::domain::model::ConvertedFile;
use crate::utils::error::{ConvertError, ErrorCategory};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Client => {
                tracing::warn!("Rejected request: {}", self);
                StatusCode::BAD_REQUEST
            }
            category => {
                tracing::error!(
                    "Request failed: {} (Category: {:?}). {}",
                    self,
                    category,
                    self.recovery_suggestion()
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Sends a converted file as a download.
pub fn attachment(file: ConvertedFile) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.filename.replace(['"', '\\'], "_")
    );

    (
        [
            (header::CONTENT_TYPE, file.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}
