//! Page types returned by [`Site`](crate::Site).

use serde::Serialize;

/// Where a page body came from.
///
/// Variants are listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// The document's source file.
    Primary,
    /// The raw snapshot held by the content store.
    Raw,
    /// The processed snapshot held by the content store.
    Processed,
    /// Nothing was available.
    Empty,
}

/// A resolved page body with links rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBody {
    pub text: String,
    pub source: BodySource,
}

/// A document ready to be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// URL path of the document.
    pub path: String,
    pub title: String,
    pub description: Option<String>,
    /// Body with front matter removed and relative links made absolute.
    pub body: String,
    #[serde(skip)]
    pub body_source: BodySource,
}

/// Title for a document without one: the last path segment in title case.
///
/// `"run-a-node"` becomes `"Run A Node"`; the root path becomes `"Home"`.
pub(crate) fn title_from_path(path: &str) -> String {
    match path.rsplit_once('/').map_or(path, |(_, last)| last) {
        "" => "Home".to_owned(),
        slug => titlecase_from_slug(slug),
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
