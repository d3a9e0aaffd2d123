//! Axum service exposing the conversion endpoints.

pub mod handlers;
pub mod response;
pub mod routes;
pub mod upload;

use crate::config::ServerConfig;
use crate::core::document_converter::OfficeConverter;
use crate::domain::ports::DocumentConverter;
use crate::utils::error::{ConvertError, Result};
use reqwest::Client;
use std::sync::Arc;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: ServerConfig,
    pub http: Client,
    pub documents: Arc<dyn DocumentConverter>,
}

impl AppState {
    pub fn new(config: ServerConfig, documents: Arc<dyn DocumentConverter>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .map_err(|e| ConvertError::ConfigError {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http,
            documents,
        })
    }

    /// State wired to the office suite named in the configuration.
    pub fn with_office_converter(config: ServerConfig) -> Result<Self> {
        let converter = OfficeConverter::new(
            config.document.office_binary.clone(),
            config.conversion_timeout(),
        );
        Self::new(config, Arc::new(converter))
    }
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = Arc::new(AppState::with_office_converter(config)?);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!("  POST /api/convert-number    - number base conversion");
    tracing::info!("  POST /api/convert-image     - image to PNG");
    tracing::info!("  POST /api/convert-document  - PDF <-> DOCX");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
