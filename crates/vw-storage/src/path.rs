//! Source path to URL path mapping.

/// Markdown extensions recognised by the content tree.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Check whether a relative source path names a markdown or MDX file.
#[must_use]
pub fn has_markdown_extension(source_path: &str) -> bool {
    source_path
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && MARKDOWN_EXTENSIONS.contains(&ext))
}

/// Canonical page path for a relative source path.
///
/// Strips the file extension from the final segment and collapses a final
/// segment that repeats its parent directory:
///
/// - `guide.md` -> `guide`
/// - `foo/bar/baz.mdx` -> `foo/bar/baz`
/// - `foo/bar/bar.mdx` -> `foo/bar`
///
/// Backslashes are normalised to forward slashes first.
#[must_use]
pub fn canonical_path(source_path: &str) -> String {
    let normalized = source_path.replace('\\', "/");
    let mut segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if let Some(last) = segments.pop() {
        let stem = last.rsplit_once('.').map_or(last, |(stem, _)| stem);
        if segments.last() != Some(&stem) {
            segments.push(stem);
        }
    }

    segments.join("/")
}

/// URL path of a document: the canonical path with a trailing `index` removed.
///
/// - `index.md` -> `""`
/// - `vara-network/index.mdx` -> `vara-network`
/// - `vara-network/staking/nominate.md` -> `vara-network/staking/nominate`
#[must_use]
pub fn url_path(source_path: &str) -> String {
    let canonical = canonical_path(source_path);
    if canonical == "index" {
        return String::new();
    }
    match canonical.strip_suffix("/index") {
        Some(parent) => parent.to_owned(),
        None => canonical,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_has_markdown_extension() {
        assert!(has_markdown_extension("guide.md"));
        assert!(has_markdown_extension("a/b/c.mdx"));
        assert!(!has_markdown_extension("image.png"));
        assert!(!has_markdown_extension("README"));
        assert!(!has_markdown_extension(".md"));
    }

    #[test]
    fn test_canonical_path_strips_extension() {
        assert_eq!(canonical_path("guide.md"), "guide");
        assert_eq!(canonical_path("foo/bar/baz.mdx"), "foo/bar/baz");
    }

    #[test]
    fn test_canonical_path_collapses_duplicate_segment() {
        assert_eq!(canonical_path("foo/bar/bar.mdx"), "foo/bar");
        assert_eq!(canonical_path("staking/staking.md"), "staking");
    }

    #[test]
    fn test_canonical_path_keeps_non_final_duplicates() {
        assert_eq!(canonical_path("foo/foo/bar.md"), "foo/foo/bar");
    }

    #[test]
    fn test_canonical_path_normalizes_separators() {
        assert_eq!(canonical_path("foo\\bar.md"), "foo/bar");
        assert_eq!(canonical_path("./foo//bar.md"), "foo/bar");
    }

    #[test]
    fn test_url_path_drops_index() {
        assert_eq!(url_path("index.md"), "");
        assert_eq!(url_path("vara-network/index.mdx"), "vara-network");
        assert_eq!(
            url_path("vara-network/staking/nominate.md"),
            "vara-network/staking/nominate"
        );
    }

    #[test]
    fn test_url_path_keeps_index_inside_name() {
        assert_eq!(url_path("reindex.md"), "reindex");
        assert_eq!(url_path("api/indexer.md"), "api/indexer");
    }
}
