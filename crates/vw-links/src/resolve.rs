//! URL classification and resolution against a public base URL.

/// Scheme prefixes that never point into the content tree.
const PASSTHROUGH_SCHEMES: &[&str] = &["data:", "mailto:", "tel:", "sms:"];

/// Resolves link targets found in a document into absolute URLs.
///
/// Resolution is pure: the same `(url, document_path)` pair always yields
/// the same result, and an already-absolute result resolves to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    base_url: String,
}

impl UrlResolver {
    /// Create a resolver. Trailing slashes on `base_url` are removed.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `raw_url` as written in the document at `document_path`.
    ///
    /// Absolute URLs, special schemes, fragments and blank URLs come back
    /// unchanged. Anything else is joined against the directory of
    /// `document_path` (or taken as site-root-relative when it starts with
    /// `/`), normalized, and prefixed with the base URL. The query and
    /// fragment suffix is carried over verbatim.
    #[must_use]
    pub fn resolve(&self, raw_url: &str, document_path: &str) -> String {
        let url = raw_url.trim();
        if is_passthrough(url) {
            return raw_url.to_owned();
        }

        let (path, suffix) = split_suffix(url);
        let resolved = if path.starts_with('/') {
            path.to_owned()
        } else {
            join_normalized(parent_dir(document_path), path)
        };

        format!("{}{resolved}{suffix}", self.base_url)
    }
}

/// Check whether a URL is left untouched by resolution.
#[must_use]
pub fn is_passthrough(url: &str) -> bool {
    if url.is_empty() || url.starts_with('#') || url.starts_with("//") {
        return true;
    }
    let lower = url
        .get(..8)
        .map_or_else(|| url.to_ascii_lowercase(), str::to_ascii_lowercase);
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || PASSTHROUGH_SCHEMES
            .iter()
            .any(|scheme| lower.starts_with(scheme))
}

/// Split a URL into its path and the `?`/`#` suffix.
fn split_suffix(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

/// Directory part of a slash-separated path (`a/b/c.md` -> `a/b`).
fn parent_dir(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit_once('/')
        .map_or("", |(dir, _)| dir)
}

/// Join `relative` onto `dir` and collapse `.` and `..` segments.
///
/// The result always starts with `/`. `..` never climbs above the root.
/// A trailing slash on `relative` is kept.
fn join_normalized(dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    let mut joined = format!("/{}", segments.join("/"));
    if relative.ends_with('/') && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}
