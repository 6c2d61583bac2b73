//! Front matter parsing shared by all storage backends.
//!
//! A front matter block is a region delimited by a `---` line at the very
//! start of a document and the next `---` line.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static H1_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

static SIDEBAR_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^sidebar_label:[ \t]*(.+?)[ \t]*\r?$").unwrap());

/// Typed front matter fields used by the pipeline.
///
/// Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sidebar_label: Option<String>,
    pub browser_title: Option<String>,
    pub custom_title: Option<String>,
}

impl FrontMatter {
    /// Parse the YAML inside a front matter block.
    ///
    /// Returns `None` for empty or malformed YAML.
    #[must_use]
    pub fn parse(yaml: &str) -> Option<Self> {
        let trimmed = yaml.trim();
        if trimmed.is_empty() {
            return None;
        }
        serde_yaml::from_str(trimmed).ok()
    }
}

/// Split a document into its front matter block and body.
///
/// Returns `(Some(yaml), body)` when the text opens with a `---` line that is
/// later closed by another `---` line, otherwise `(None, content)`.
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(first_end) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_end].trim_end() != "---" {
        return (None, content);
    }

    let yaml_start = first_end + 1;
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == "---" {
            // Exclude the newline that terminates the last YAML line.
            let yaml = content[yaml_start..offset]
                .strip_suffix('\n')
                .unwrap_or(&content[yaml_start..offset]);
            let yaml = yaml.strip_suffix('\r').unwrap_or(yaml);
            return (Some(yaml), &content[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

/// Remove a leading front matter block, if any.
#[must_use]
pub fn strip_front_matter(content: &str) -> &str {
    split_front_matter(content).1
}

/// Extract `sidebar_label` from a document by line-oriented match.
///
/// Only the front matter block is searched. Matching quotes around the value
/// are removed. Works even when the surrounding YAML is malformed.
#[must_use]
pub fn sidebar_label(content: &str) -> Option<String> {
    let (Some(yaml), _) = split_front_matter(content) else {
        return None;
    };
    let raw = SIDEBAR_LABEL_REGEX.captures(yaml)?.get(1)?.as_str();
    let value = unquote(raw).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Extract the text of the first level-one heading.
#[must_use]
pub fn first_heading(content: &str) -> Option<String> {
    H1_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|title| !title.is_empty())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_front_matter() {
        let content = "---\ntitle: Guide\n---\n# Body\n";

        let (yaml, body) = split_front_matter(content);

        assert_eq!(yaml, Some("title: Guide"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_front_matter_without_block() {
        let content = "# Title\n\n---\n\nText";

        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_front_matter_unclosed() {
        let content = "---\ntitle: Guide\n# Body";

        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_front_matter_at_end_of_file() {
        let (yaml, body) = split_front_matter("---\ntitle: Guide\n---");

        assert_eq!(yaml, Some("title: Guide"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let (yaml, body) = split_front_matter("---\r\ntitle: Guide\r\n---\r\nBody");

        assert_eq!(yaml, Some("title: Guide"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_front_matter_empty_block() {
        let (yaml, body) = split_front_matter("---\n---\nBody");

        assert_eq!(yaml, Some(""));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_strip_front_matter() {
        assert_eq!(strip_front_matter("---\na: 1\n---\nText"), "Text");
        assert_eq!(strip_front_matter("Text"), "Text");
    }

    #[test]
    fn test_front_matter_parse() {
        let fm = FrontMatter::parse(
            "title: Nominate\ndescription: \"How to nominate\"\nsidebar_label: Nominate\nsidebar_position: 2",
        )
        .unwrap();

        assert_eq!(fm.title.as_deref(), Some("Nominate"));
        assert_eq!(fm.description.as_deref(), Some("How to nominate"));
        assert_eq!(fm.sidebar_label.as_deref(), Some("Nominate"));
        assert_eq!(fm.browser_title, None);
    }

    #[test]
    fn test_front_matter_parse_malformed() {
        assert_eq!(FrontMatter::parse("title: [unclosed"), None);
        assert_eq!(FrontMatter::parse("   "), None);
    }

    #[test]
    fn test_sidebar_label() {
        assert_eq!(
            sidebar_label("---\nsidebar_label: Staking\n---\nBody"),
            Some("Staking".to_owned())
        );
        assert_eq!(
            sidebar_label("---\nsidebar_label: 'Run a Node'\n---\n"),
            Some("Run a Node".to_owned())
        );
    }

    #[test]
    fn test_sidebar_label_survives_malformed_yaml() {
        let content = "---\ntitle: Bad: yaml: here\nsidebar_label: \"Bridge\"\n---\n";

        assert_eq!(sidebar_label(content), Some("Bridge".to_owned()));
    }

    #[test]
    fn test_sidebar_label_ignores_body() {
        assert_eq!(sidebar_label("sidebar_label: Body\n"), None);
        assert_eq!(sidebar_label("---\ntitle: A\n---\nsidebar_label: Body\n"), None);
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(
            first_heading("Intro\n\n# Getting Started\n\n## Sub"),
            Some("Getting Started".to_owned())
        );
        assert_eq!(first_heading("## Only sub"), None);
    }
}
