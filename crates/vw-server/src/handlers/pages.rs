//! Pages API endpoint.
//!
//! Returns a document's title, description and link-rewritten body as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use vw_site::{BodySource, Page};

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Debug, Serialize)]
pub(crate) struct PageResponse {
    /// Front-matter title, or one derived from the path.
    title: String,
    /// Front-matter description.
    description: Option<String>,
    /// Markdown body with relative links made absolute.
    body: String,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            title: page.title,
            description: page.description,
            body: page.body,
        }
    }
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PageResponse>, ServerError> {
    get_page_impl(String::new(), &state)
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PageResponse>, ServerError> {
    get_page_impl(path, &state)
}

#[allow(clippy::needless_pass_by_value)]
fn get_page_impl(path: String, state: &AppState) -> Result<Json<PageResponse>, ServerError> {
    let page = state
        .site
        .page(&path)
        .ok_or_else(|| ServerError::PageNotFound(path.clone()))?;

    if page.body_source != BodySource::Primary {
        tracing::info!(path = %path, source = ?page.body_source, "Served fallback body");
    }

    Ok(Json(PageResponse::from(page)))
}
