//! folio server binary

use std::sync::Arc;

use folio_core::FolioConfig;
use folio_server::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("FOLIO_CONFIG") {
        Ok(path) => {
            tracing::info!(path = %path, "loading configuration");
            FolioConfig::load(&path)?
        }
        Err(_) => FolioConfig::default(),
    };
    let addr = std::env::var("FOLIO_ADDR").unwrap_or_else(|_| config.server.addr.clone());

    let state = Arc::new(AppState::from_config(config)?);
    serve(&addr, state).await
}
