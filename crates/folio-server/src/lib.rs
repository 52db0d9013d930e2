//! folio server
//!
//! HTTP surface over folio-core: the raw data documents, the rendered
//! portfolio sections and the citation text of each publication.

pub mod http;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use folio_core::{ConfigError, DataLoader, FolioConfig};

/// Shared application state
pub struct AppState {
    pub loader: Arc<DataLoader>,
    pub config: FolioConfig,
}

impl AppState {
    pub fn new(config: FolioConfig, loader: Arc<DataLoader>) -> Self {
        Self { loader, config }
    }

    /// Build the loader from the configured data source
    pub fn from_config(config: FolioConfig) -> Result<Self, ConfigError> {
        let source = config.data.build_source()?;
        tracing::info!(source = %source.describe(), "data source ready");
        let loader = Arc::new(DataLoader::new(source, config.data.catalog()));
        Ok(Self::new(config, loader))
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Data documents
        .route("/data/{name}", get(http::get_document))
        // Rendered sections
        .route("/sections/publications", get(http::publications_section))
        .route("/sections/projects", get(http::projects_section))
        .route("/sections/{kind}", get(http::timeline_section))
        // Citations
        .route("/publications/{id}/citation", get(http::get_citation))
        // System
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("folio server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
