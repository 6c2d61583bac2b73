//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::get_health))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    let llms_routes = Router::new()
        .route("/llms.txt", get(handlers::llms::llms_txt))
        .route("/llms-full.txt", get(handlers::llms::llms_full_txt))
        .route("/llms.mdx/{*path}", get(handlers::llms::page_markdown))
        .route("/docs/{*path}", get(handlers::llms::docs_markdown));

    Router::new()
        .merge(api_routes)
        .merge(llms_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use vw_export::{ExportOptions, Exporter};
    use vw_site::Site;
    use vw_storage::{Document, MockStorage};

    use super::*;

    const BASE: &str = "https://wiki.vara.network/docs";

    fn router(storage: MockStorage) -> Router {
        let state = Arc::new(AppState {
            site: Arc::new(Site::new(Arc::new(storage), BASE)),
            exporter: Exporter::new(ExportOptions {
                base_url: BASE.to_owned(),
                title: "Vara Wiki".to_owned(),
                description: "Docs".to_owned(),
                ..ExportOptions::default()
            }),
            version: "1.2.3".to_owned(),
        });
        create_router(state)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn sample() -> MockStorage {
        MockStorage::new()
            .with_file("index.md", "---\ntitle: Welcome\n---\nStart [here](intro.md).\n")
            .with_file(
                "vara-network/staking/nominate.md",
                "---\ntitle: Nominate\ndescription: Become a nominator\nsidebar_label: Nominate\n---\n\
                 See [validators](../validate.md#setup) and ![flow](./flow.png).\n",
            )
    }

    #[tokio::test]
    async fn test_get_page() {
        let (status, _, body) =
            get(router(sample()), "/api/pages/vara-network/staking/nominate").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "title": "Nominate",
                "description": "Become a nominator",
                "body": "See [validators](https://wiki.vara.network/docs/vara-network/validate.md#setup) \
                         and ![flow](https://wiki.vara.network/docs/vara-network/staking/flow.png).\n",
            })
        );
    }

    #[tokio::test]
    async fn test_get_root_page() {
        let (status, _, body) = get(router(sample()), "/api/pages/").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Welcome");
        assert_eq!(json["description"], Value::Null);
        assert_eq!(json["body"], "Start [here](https://wiki.vara.network/docs/intro.md).\n");
    }

    #[tokio::test]
    async fn test_missing_page_is_404() {
        let (status, _, body) = get(router(sample()), "/api/pages/no/such/page").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"error": "Page not found", "path": "no/such/page"}));
    }

    #[tokio::test]
    async fn test_unreadable_source_still_returns_json() {
        let storage = MockStorage::new().with_document(
            Document::new("broken.md")
                .with_title("Broken")
                .with_description("Source removed"),
        );

        let (status, _, body) = get(router(storage), "/api/pages/broken").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"title": "Broken", "description": "Source removed", "body": ""}));
    }

    #[tokio::test]
    async fn test_page_markdown() {
        let (status, headers, body) =
            get(router(sample()), "/llms.mdx/vara-network/staking/nominate").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/markdown; charset=utf-8");
        assert!(body.starts_with("# Nominate\n\nSee [validators](../validate.md#setup)"));
    }

    #[tokio::test]
    async fn test_page_markdown_missing_is_404() {
        let (status, _, _) = get(router(sample()), "/llms.mdx/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_docs_mdx_alias() {
        let (status, headers, body) =
            get(router(sample()), "/docs/vara-network/staking/nominate.mdx").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/markdown; charset=utf-8");
        let (_, _, direct) =
            get(router(sample()), "/llms.mdx/vara-network/staking/nominate").await;
        assert_eq!(body, direct);
    }

    #[tokio::test]
    async fn test_docs_without_mdx_suffix_is_404() {
        let (status, _, body) =
            get(router(sample()), "/docs/vara-network/staking/nominate").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["path"], "vara-network/staking/nominate");
    }

    #[tokio::test]
    async fn test_llms_txt() {
        let (status, headers, body) = get(router(sample()), "/llms.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(
            body,
            "# Vara Wiki\n\n> Docs\n\n## Vara-network\n\n\
             - [Nominate](https://wiki.vara.network/docs/vara-network/staking/nominate)\n"
        );
    }

    #[tokio::test]
    async fn test_llms_full_txt() {
        let (status, _, body) = get(router(sample()), "/llms-full.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(
            "<!-- Source: https://wiki.vara.network/docs/index -->\n---\ntitle: Welcome"
        ));
        assert!(body.contains(
            "\n\n---\n\n<!-- Source: https://wiki.vara.network/docs/vara-network/staking/nominate -->\n"
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get(router(MockStorage::new()), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({"status": "ok", "version": "1.2.3"}));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let (_, headers, _) = get(router(MockStorage::new()), "/api/health").await;

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
    }
}
