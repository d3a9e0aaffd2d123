use crate::domain::model::{ConvertedFile, DocumentFormat};
use crate::domain::ports::DocumentConverter;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::file_extension;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use url::Url;

pub const DOCUMENT_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Runs an office suite (LibreOffice by default) in headless mode.
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    binary: String,
    timeout: Duration,
}

impl OfficeConverter {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn command(&self, input: &Path, target: DocumentFormat, out_dir: &Path) -> Result<Command> {
        // 每次轉換使用獨立的使用者設定檔，否則並行的 soffice 會交給同一個執行個體處理
        let profile_dir = out_dir.join("profile");
        let profile_url =
            Url::from_directory_path(&profile_dir).map_err(|_| ConvertError::ConversionFailed {
                message: format!("cannot build profile URL for {}", profile_dir.display()),
            })?;

        let mut command = Command::new(&self.binary);
        command
            .arg(format!("-env:UserInstallation={}", profile_url))
            .arg("--headless");

        match target {
            // PDF 需要 Writer 的匯入濾鏡，否則會被 Draw 開啟
            DocumentFormat::Docx => {
                command
                    .arg("--infilter=writer_pdf_import")
                    .arg("--convert-to")
                    .arg("docx:MS Word 2007 XML");
            }
            DocumentFormat::Pdf => {
                command.arg("--convert-to").arg("pdf");
            }
        }

        command
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .kill_on_drop(true);
        Ok(command)
    }
}

#[async_trait]
impl DocumentConverter for OfficeConverter {
    async fn convert(&self, input: &Path, target: DocumentFormat, out_dir: &Path) -> Result<PathBuf> {
        tracing::debug!(
            binary = %self.binary,
            input = %input.display(),
            target = target.extension(),
            "running office converter"
        );

        let mut command = self.command(input, target, out_dir)?;
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ConvertError::ConversionFailed {
                message: format!(
                    "{} did not finish within {} seconds",
                    self.binary,
                    self.timeout.as_secs()
                ),
            })?
            .map_err(|e| ConvertError::ConversionFailed {
                message: format!("failed to start {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::ConversionFailed {
                message: format!("{} exited with {}: {}", self.binary, output.status, stderr.trim()),
            });
        }

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let produced = out_dir.join(format!("{}.{}", stem, target.extension()));

        if !tokio::fs::try_exists(&produced).await.unwrap_or(false) {
            return Err(ConvertError::ConversionFailed {
                message: format!("{} produced no {} output", self.binary, target.extension()),
            });
        }

        Ok(produced)
    }
}

/// Reduces an uploaded file name to a safe single path component.
pub fn sanitize_filename(filename: &str) -> String {
    // 只取最後一段，避免 "../" 之類的路徑
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Converts an uploaded document: PDF becomes DOCX, DOC/DOCX become PDF.
///
/// Work happens inside a temporary directory that is removed when this
/// function returns; the converted bytes are read into memory first.
pub async fn convert_document(
    converter: &dyn DocumentConverter,
    filename: &str,
    bytes: &[u8],
) -> Result<ConvertedFile> {
    let target = file_extension(filename)
        .and_then(|ext| DocumentFormat::conversion_target(&ext))
        .ok_or_else(|| ConvertError::UnsupportedFileType {
            kind: "document".to_string(),
            allowed: DOCUMENT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    let work_dir = tempfile::tempdir()?;
    let safe_name = sanitize_filename(filename);
    let input_path = work_dir.path().join(&safe_name);
    tokio::fs::write(&input_path, bytes).await?;
    tracing::info!("Saved uploaded file to temporary path: {}", input_path.display());

    let output_path = converter.convert(&input_path, target, work_dir.path()).await?;
    let converted = tokio::fs::read(&output_path)
        .await
        .map_err(|e| ConvertError::ConversionFailed {
            message: format!("could not read converted file: {}", e),
        })?;

    let stem = Path::new(&safe_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let output_name = format!("{}.{}", stem, target.extension());
    tracing::info!(
        "Converted {} to {} ({} bytes)",
        safe_name,
        output_name,
        converted.len()
    );

    Ok(ConvertedFile {
        filename: output_name,
        mime_type: target.mime_type(),
        bytes: converted,
    })
}
