//! Request-time page lookup.

use std::sync::Arc;

use vw_links::LinkRewriter;
use vw_storage::{Document, Storage, strip_front_matter};

use crate::page::{BodySource, Page, PageBody, title_from_path};

/// Serves documents from a content store with links rewritten.
///
/// Lookups never fail: a missing document is `None`, and a document whose
/// text can't be read gets the best fallback body available.
pub struct Site {
    storage: Arc<dyn Storage>,
    rewriter: LinkRewriter,
}

impl Site {
    /// Create a site over `storage`, resolving links against `base_url`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, base_url: &str) -> Self {
        Self {
            storage,
            rewriter: LinkRewriter::new(base_url),
        }
    }

    /// The underlying content store.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Base URL used for rewritten links.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.rewriter.base_url()
    }

    /// Look up a document by slug.
    ///
    /// Leading and trailing slashes, a `.md`/`.mdx` extension and a trailing
    /// `index` segment are ignored.
    #[must_use]
    pub fn document(&self, slug: &str) -> Option<Document> {
        let path = normalize_slug(slug);
        match self.storage.get(&path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Document lookup failed");
                None
            }
        }
    }

    /// Resolve a page for `slug`.
    ///
    /// Returns `None` if no document exists at that path.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<Page> {
        let document = self.document(slug)?;
        let body = self.body(&document);
        Some(Page {
            title: document
                .title
                .unwrap_or_else(|| title_from_path(&document.path)),
            description: document.description,
            body: body.text,
            body_source: body.source,
            path: document.path,
        })
    }

    /// Resolve the body of `document` and rewrite its links.
    ///
    /// Sources are tried in order: the primary file, the raw snapshot, the
    /// processed snapshot. If all fail the body is empty.
    #[must_use]
    pub fn body(&self, document: &Document) -> PageBody {
        let path = document.path.as_str();
        let (text, source) = match self.storage.read(path) {
            Ok(text) => (text, BodySource::Primary),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Source unavailable, using fallback body");
                self.fallback_text(path)
            }
        };

        PageBody {
            text: self.rewriter.rewrite(&text, &document.source_path),
            source,
        }
    }

    /// Plain markdown of a page for language models: `# {title}` followed by
    /// the processed body.
    ///
    /// Falls back to the raw body, then to an empty body.
    #[must_use]
    pub fn llm_text(&self, slug: &str) -> Option<String> {
        let document = self.document(slug)?;
        let path = document.path.as_str();
        let body = self
            .storage
            .processed_text(path)
            .or_else(|e| {
                tracing::debug!(path = %path, error = %e, "Processed text unavailable");
                self.storage
                    .raw_text(path)
                    .map(|raw| strip_front_matter(&raw).to_owned())
            })
            .unwrap_or_else(|e| {
                tracing::debug!(path = %path, error = %e, "Raw text unavailable");
                String::new()
            });
        let title = document
            .title
            .unwrap_or_else(|| title_from_path(&document.path));

        Some(format!("# {title}\n\n{body}"))
    }

    fn fallback_text(&self, path: &str) -> (String, BodySource) {
        match self.storage.raw_text(path) {
            Ok(text) => return (text, BodySource::Raw),
            Err(e) => tracing::debug!(path = %path, error = %e, "Raw text unavailable"),
        }
        match self.storage.processed_text(path) {
            Ok(text) => return (text, BodySource::Processed),
            Err(e) => tracing::debug!(path = %path, error = %e, "Processed text unavailable"),
        }
        tracing::warn!(path = %path, "No body available, serving empty page");
        (String::new(), BodySource::Empty)
    }
}

/// Map a request slug to a document URL path.
fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim_matches('/');
    let trimmed = trimmed
        .strip_suffix(".mdx")
        .or_else(|| trimmed.strip_suffix(".md"))
        .unwrap_or(trimmed);
    if trimmed == "index" {
        return String::new();
    }
    trimmed
        .strip_suffix("/index")
        .unwrap_or(trimmed)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use vw_storage::MockStorage;
    use vw_storage_fs::FsStorage;

    use super::*;

    const BASE: &str = "https://wiki.vara.network/docs";

    fn site(storage: MockStorage) -> Site {
        Site::new(Arc::new(storage), BASE)
    }

    #[test]
    fn test_site_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Site>();
    }

    #[test]
    fn test_page_from_primary_source() {
        let site = site(MockStorage::new().with_file(
            "vara-network/staking/nominate.md",
            "---\ntitle: Nominate\ndescription: Become a nominator\n---\nSee [validators](../validate.md#section).\n",
        ));

        let page = site.page("vara-network/staking/nominate").unwrap();

        assert_eq!(page.title, "Nominate");
        assert_eq!(page.description.as_deref(), Some("Become a nominator"));
        assert_eq!(
            page.body,
            "See [validators](https://wiki.vara.network/docs/vara-network/validate.md#section).\n"
        );
        assert_eq!(page.body_source, BodySource::Primary);
    }

    #[test]
    fn test_missing_page_is_none() {
        let site = site(MockStorage::new());

        assert!(site.page("nope").is_none());
        assert!(site.llm_text("nope").is_none());
    }

    #[test]
    fn test_fallback_to_raw_snapshot() {
        let site = site(
            MockStorage::new()
                .with_document(Document::new("a/b.md").with_title("B"))
                .with_raw_text("a/b", "[c](c.md)")
                .with_processed_text("a/b", "processed"),
        );

        let page = site.page("a/b").unwrap();

        assert_eq!(page.body, "[c](https://wiki.vara.network/docs/a/c.md)");
        assert_eq!(page.body_source, BodySource::Raw);
    }

    #[test]
    fn test_fallback_to_processed_snapshot() {
        let site = site(
            MockStorage::new()
                .with_document(Document::new("a/b.md"))
                .with_processed_text("a/b", "processed"),
        );

        let page = site.page("a/b").unwrap();

        assert_eq!(page.body, "processed");
        assert_eq!(page.body_source, BodySource::Processed);
        assert_eq!(page.title, "B");
    }

    #[test]
    fn test_fallback_to_empty_body() {
        let site = site(MockStorage::new().with_document(Document::new("a/b.md")));

        let page = site.page("a/b").unwrap();

        assert_eq!(page.body, "");
        assert_eq!(page.body_source, BodySource::Empty);
    }

    #[test]
    fn test_fallback_after_file_removed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("guide.md");
        fs::write(&file, "---\ntitle: Guide\n---\n[next](next.md)\n").unwrap();
        let storage = FsStorage::new(PathBuf::from(temp_dir.path()));
        let site = Site::new(Arc::new(storage), BASE);
        assert!(site.page("guide").is_some());

        fs::remove_file(&file).unwrap();
        let page = site.page("guide").unwrap();

        assert_eq!(page.body_source, BodySource::Raw);
        assert_eq!(page.body, "[next](https://wiki.vara.network/docs/next.md)\n");
    }

    #[test]
    fn test_fallback_body_matches_primary() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("guide.md");
        fs::write(
            &file,
            "---\ntitle: Guide\n---\n---\nIntro\n---\n[next](next.md)\n",
        )
        .unwrap();
        let storage = FsStorage::new(PathBuf::from(temp_dir.path()));
        let site = Site::new(Arc::new(storage), BASE);
        let primary = site.page("guide").unwrap();

        fs::remove_file(&file).unwrap();
        let fallback = site.page("guide").unwrap();

        assert_eq!(primary.body_source, BodySource::Primary);
        assert_eq!(fallback.body_source, BodySource::Raw);
        assert_eq!(fallback.body, primary.body);
        assert_eq!(
            primary.body,
            "---\nIntro\n---\n[next](https://wiki.vara.network/docs/next.md)\n"
        );
        assert_eq!(
            site.llm_text("guide").unwrap(),
            "# Guide\n\n---\nIntro\n---\n[next](next.md)\n"
        );
    }

    #[test]
    fn test_llm_text_strips_front_matter_from_raw() {
        let site = site(
            MockStorage::new()
                .with_document(Document::new("p.md").with_title("P"))
                .with_raw_text("p", "---\ntitle: P\n---\nraw body"),
        );

        assert_eq!(site.llm_text("p").unwrap(), "# P\n\nraw body");
    }

    #[test]
    fn test_slug_normalization() {
        let site = site(
            MockStorage::new()
                .with_file("index.md", "# Home")
                .with_file("vara-network/index.mdx", "# Vara")
                .with_file("guide.md", "# Guide"),
        );

        assert_eq!(site.page("").unwrap().title, "Home");
        assert_eq!(site.page("/index").unwrap().title, "Home");
        assert_eq!(site.page("vara-network/").unwrap().title, "Vara");
        assert_eq!(site.page("vara-network/index.mdx").unwrap().title, "Vara");
        assert_eq!(site.page("/guide.md").unwrap().title, "Guide");
    }

    #[test]
    fn test_llm_text() {
        let site = site(MockStorage::new().with_file(
            "guide.md",
            "---\ntitle: Guide\n---\nBody text\n",
        ));

        assert_eq!(site.llm_text("guide").unwrap(), "# Guide\n\nBody text\n");
    }

    #[test]
    fn test_llm_text_falls_back_to_raw() {
        let site = site(
            MockStorage::new()
                .with_document(Document::new("p.md").with_title("P"))
                .with_raw_text("p", "raw body"),
        );

        assert_eq!(site.llm_text("p").unwrap(), "# P\n\nraw body");
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/a/b/"), "a/b");
        assert_eq!(normalize_slug("a/b.mdx"), "a/b");
        assert_eq!(normalize_slug("a/index"), "a");
        assert_eq!(normalize_slug("index.md"), "");
        assert_eq!(normalize_slug("release-1.2"), "release-1.2");
    }
}
