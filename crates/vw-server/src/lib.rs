//! HTTP server for the VW documentation pipeline.
//!
//! Serves, over axum:
//! - `GET /api/pages/{path}`: `{title, description, body}` with relative
//!   links in the body made absolute
//! - `GET /llms.mdx/{path}` and `GET /docs/{path}.mdx`: a single page as plain markdown
//! - `GET /llms.txt` and `GET /llms-full.txt`: the content export, built live
//! - `GET /api/health`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use vw_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("content/docs"),
//!         version: "1.0.0".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use vw_export::{ExportOptions, Exporter};
use vw_site::Site;
use vw_storage::Storage;
use vw_storage_fs::FsStorage;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// Public URL of the docs root that links are anchored at.
    pub base_url: String,
    /// Site title for `llms.txt`.
    pub site_title: String,
    /// Site description for `llms.txt`.
    pub site_description: String,
    /// Application version (reported by `/api/health`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let export = ExportOptions::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 7979,
            source_dir: PathBuf::from("content/docs"),
            base_url: export.base_url,
            site_title: export.title,
            site_description: export.description,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener can't bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.source_dir.clone()));
    let site = Arc::new(Site::new(storage, &config.base_url));
    let exporter = Exporter::new(ExportOptions {
        base_url: config.base_url.clone(),
        title: config.site_title.clone(),
        description: config.site_description.clone(),
        ..ExportOptions::default()
    });

    let state = Arc::new(AppState {
        site,
        exporter,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, base_url = %config.base_url, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from VW config.
#[must_use]
pub fn server_config_from_config(config: &vw_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        base_url: config.site.base_url(),
        site_title: config.site.title.clone(),
        site_description: config.site.description.clone(),
        version,
    }
}
