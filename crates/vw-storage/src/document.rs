//! Document metadata returned by storage scans.

use crate::front_matter::{FrontMatter, first_heading, sidebar_label, split_front_matter};
use crate::path::url_path;

/// A markdown or MDX file in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// URL path used as the routing key (e.g. `vara-network/staking/nominate`).
    ///
    /// Empty for the root `index.md`.
    pub path: String,
    /// Slash-separated file path relative to the content root, extension
    /// included (e.g. `vara-network/staking/nominate.md`).
    ///
    /// Relative links inside the document resolve against its directory.
    pub source_path: String,
    /// Front matter `title`, else `sidebar_label`, else first H1.
    pub title: Option<String>,
    pub description: Option<String>,
    pub sidebar_label: Option<String>,
}

impl Document {
    /// Create a document with no metadata.
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        let source_path = source_path.into();
        Self {
            path: url_path(&source_path),
            source_path,
            title: None,
            description: None,
            sidebar_label: None,
        }
    }

    /// Create a document and derive its metadata from the file content.
    #[must_use]
    pub fn from_source(source_path: impl Into<String>, content: &str) -> Self {
        let (yaml, body) = split_front_matter(content);
        let front_matter = yaml.and_then(FrontMatter::parse).unwrap_or_default();
        let sidebar_label = front_matter.sidebar_label.or_else(|| sidebar_label(content));
        let title = front_matter
            .title
            .or_else(|| sidebar_label.clone())
            .or_else(|| first_heading(body));

        Self {
            title,
            description: front_matter.description,
            sidebar_label,
            ..Self::new(source_path)
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_derives_url_path() {
        let doc = Document::new("vara-network/staking/nominate.md");

        assert_eq!(doc.path, "vara-network/staking/nominate");
        assert_eq!(doc.source_path, "vara-network/staking/nominate.md");
        assert_eq!(doc.title, None);
    }

    #[test]
    fn test_from_source_prefers_front_matter_title() {
        let doc = Document::from_source(
            "guide.md",
            "---\ntitle: Guide\ndescription: Start here\nsidebar_label: Start\n---\n# Heading\n",
        );

        assert_eq!(doc.title.as_deref(), Some("Guide"));
        assert_eq!(doc.description.as_deref(), Some("Start here"));
        assert_eq!(doc.sidebar_label.as_deref(), Some("Start"));
    }

    #[test]
    fn test_from_source_falls_back_to_sidebar_label() {
        let doc = Document::from_source("guide.md", "---\nsidebar_label: Start\n---\n# Heading\n");

        assert_eq!(doc.title.as_deref(), Some("Start"));
    }

    #[test]
    fn test_from_source_falls_back_to_heading() {
        let doc = Document::from_source("guide.md", "# Heading\n\nText");

        assert_eq!(doc.title.as_deref(), Some("Heading"));
        assert_eq!(doc.sidebar_label, None);
    }

    #[test]
    fn test_from_source_malformed_yaml_keeps_sidebar_label() {
        let doc = Document::from_source(
            "bridge.md",
            "---\ntitle: Bad: yaml\nsidebar_label: Bridge\n---\n# Bridge docs\n",
        );

        assert_eq!(doc.sidebar_label.as_deref(), Some("Bridge"));
        assert_eq!(doc.title.as_deref(), Some("Bridge"));
    }

    #[test]
    fn test_heading_in_front_matter_ignored() {
        let doc = Document::from_source("a.md", "---\n# comment\n---\nNo heading");

        assert_eq!(doc.title, None);
    }
}
