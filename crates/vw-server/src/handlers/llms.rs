//! Plain-text exports for language models.
//!
//! `llms.txt` and `llms-full.txt` are rebuilt from the content store on
//! every request, so they always match what `vw export` would write.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

const MARKDOWN: &str = "text/markdown; charset=utf-8";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Handle GET /llms.txt.
pub(crate) async fn llms_txt(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let collected = state.exporter.collect(state.site.storage().as_ref())?;
    Ok((
        [(header::CONTENT_TYPE, PLAIN_TEXT)],
        state.exporter.render_index(&collected),
    ))
}

/// Handle GET /llms-full.txt.
pub(crate) async fn llms_full_txt(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let collected = state.exporter.collect(state.site.storage().as_ref())?;
    Ok((
        [(header::CONTENT_TYPE, PLAIN_TEXT)],
        state.exporter.render_full(&collected),
    ))
}

/// Handle GET /llms.mdx/{path}.
pub(crate) async fn page_markdown(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    markdown_response(&state, path)
}

/// Handle GET /docs/{path}.mdx, the public alias of `/llms.mdx/{path}`.
///
/// Paths without the `.mdx` suffix are not pages of this server.
pub(crate) async fn docs_markdown(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    match path.strip_suffix(".mdx") {
        Some(slug) => markdown_response(&state, slug.to_owned()),
        None => Err(ServerError::PageNotFound(path)),
    }
}

fn markdown_response(state: &AppState, path: String) -> Result<Response, ServerError> {
    let text = state
        .site
        .llm_text(&path)
        .ok_or(ServerError::PageNotFound(path))?;
    Ok(([(header::CONTENT_TYPE, MARKDOWN)], text).into_response())
}
