use crate::utils::error::{ConvertError, Result};
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Fields of the `multipart/form-data` forms used by the upload endpoints.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// The `file` part, if it carried a non-empty file name.
    pub file: Option<UploadedFile>,
    /// The `url` field, trimmed, if non-empty.
    pub url: Option<String>,
}

fn bad_form(e: MultipartError) -> ConvertError {
    ConvertError::BadRequest {
        message: e.body_text(),
    }
}

impl UploadForm {
    pub async fn read(multipart: std::result::Result<Multipart, MultipartRejection>) -> Result<Self> {
        let mut multipart = multipart.map_err(|e| ConvertError::BadRequest {
            message: e.body_text(),
        })?;
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(bad_form)?;
                    // 瀏覽器在未選擇檔案時仍會送出空檔名的 part
                    if !filename.is_empty() {
                        tracing::info!("File uploaded: {} ({} bytes)", filename, bytes.len());
                        form.file = Some(UploadedFile {
                            filename,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                Some("url") => {
                    let text = field.text().await.map_err(bad_form)?;
                    let text = text.trim();
                    if !text.is_empty() {
                        form.url = Some(text.to_string());
                    }
                }
                other => {
                    tracing::debug!("Ignoring form field {:?}", other);
                }
            }
        }

        Ok(form)
    }
}
