use crate::domain::model::DocumentFormat;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// External engine that transcodes office documents on disk.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Converts `input` into `target`, writing the result inside `out_dir`.
    /// Returns the path of the produced file.
    async fn convert(&self, input: &Path, target: DocumentFormat, out_dir: &Path) -> Result<PathBuf>;
}
