//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use vw_export::Exporter;
use vw_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page lookup with link rewriting.
    pub(crate) site: Arc<Site>,
    /// Builds the live `llms.txt` and `llms-full.txt` responses.
    pub(crate) exporter: Exporter,
    /// Application version reported by the health endpoint.
    pub(crate) version: String,
}
