//! POST /api/convert-image

use crate::core::image_converter::{self, IMAGE_EXTENSIONS};
use crate::server::response::attachment;
use crate::server::upload::UploadForm;
use crate::server::AppState;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_file_extension, validate_url};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Response,
};
use std::sync::Arc;

/// Accepts an uploaded image (preferred) or an image URL and returns it as PNG.
pub async fn convert_image(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    tracing::info!("Received request for image conversion");
    let form = UploadForm::read(multipart).await?;

    let bytes = if let Some(file) = form.file {
        validate_file_extension("image", &file.filename, &IMAGE_EXTENSIONS)?;
        file.bytes
    } else if let Some(url) = form.url {
        validate_url("url", &url)?;
        image_converter::fetch_image(&state.http, &url, state.config.server.max_upload_bytes).await?
    } else {
        return Err(ConvertError::BadRequest {
            message: "No image file uploaded or URL provided.".to_string(),
        });
    };

    let converted = tokio::task::spawn_blocking(move || image_converter::convert_to_png(&bytes))
        .await
        .map_err(|e| ConvertError::ConversionFailed {
            message: format!("image worker stopped: {}", e),
        })??;

    tracing::info!("Sending converted image: {}", converted.filename);
    Ok(attachment(converted))
}
