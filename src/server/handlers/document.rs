//! POST /api/convert-document

use crate::core::document_converter::{self, DOCUMENT_EXTENSIONS};
use crate::server::response::attachment;
use crate::server::upload::UploadForm;
use crate::server::AppState;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_file_extension;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Response,
};
use std::sync::Arc;

pub async fn convert_document(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    tracing::info!("Received request for document conversion");
    let form = UploadForm::read(multipart).await?;

    let file = form.file.ok_or_else(|| ConvertError::BadRequest {
        message: "No document file uploaded.".to_string(),
    })?;
    validate_file_extension("document", &file.filename, &DOCUMENT_EXTENSIONS)?;

    let converted =
        document_converter::convert_document(state.documents.as_ref(), &file.filename, &file.bytes)
            .await?;

    tracing::info!("Sending converted document: {}", converted.filename);
    Ok(attachment(converted))
}
