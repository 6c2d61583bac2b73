//! Relative link rewriting for markdown and MDX documents.
//!
//! [`LinkRewriter`] turns relative link and resource references in a document
//! body into absolute URLs under a public base URL, so the body can be served
//! outside the site (API responses, LLM exports) without broken links.
//!
//! # Processing
//!
//! 1. A leading front matter block is removed.
//! 2. The text is split on triple-backtick markers; fenced segments are
//!    copied verbatim.
//! 3. Outside fences three passes run in order, each over the previous
//!    output: markdown links and images, quoted HTML attributes, and JSX
//!    string-literal attributes.
//! 4. Each target goes through [`UrlResolver`]. A target that resolves to
//!    itself is left exactly as written.
//!
//! # Example
//!
//! ```
//! use vw_links::LinkRewriter;
//!
//! let rewriter = LinkRewriter::new("https://wiki.vara.network/docs");
//! let body = rewriter.rewrite(
//!     "See [validators](../validate.md#setup).",
//!     "vara-network/staking/nominate.md",
//! );
//! assert_eq!(
//!     body,
//!     "See [validators](https://wiki.vara.network/docs/vara-network/validate.md#setup)."
//! );
//! ```

mod fence;
mod resolve;
mod scan;

pub use resolve::{UrlResolver, is_passthrough};
pub use scan::{LinkKind, LinkRef};

use vw_storage::strip_front_matter;

/// Rewrites relative link targets in document bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewriter {
    resolver: UrlResolver,
}

impl LinkRewriter {
    /// Create a rewriter anchored at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            resolver: UrlResolver::new(base_url),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.resolver.base_url()
    }

    /// The resolver used for individual targets.
    #[must_use]
    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    /// Rewrite `content` as the body of the document at `document_path`.
    ///
    /// `document_path` is the document's location in the content tree;
    /// relative targets resolve against its directory. Never fails: text that
    /// doesn't parse as a link is left unchanged.
    #[must_use]
    pub fn rewrite(&self, content: &str, document_path: &str) -> String {
        let body = strip_front_matter(content);
        fence::map_unfenced(body, |segment| {
            let text = self.apply(segment, scan::markdown::scan, document_path);
            let text = self.apply(&text, scan::html::scan, document_path);
            self.apply(&text, scan::expression::scan, document_path)
        })
    }

    /// Run one scanner over `text` and splice in resolved targets.
    fn apply(
        &self,
        text: &str,
        scanner: for<'a> fn(&'a str) -> Vec<LinkRef<'a>>,
        document_path: &str,
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for link in scanner(text) {
            let resolved = self.resolver.resolve(link.raw_url, document_path);
            if resolved == link.raw_url {
                continue;
            }
            out.push_str(&text[last..link.span.start]);
            out.push_str(&resolved);
            last = link.span.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BASE: &str = "https://wiki.vara.network/docs";
    const PAGE: &str = "vara-network/staking/nominate.md";

    fn rewrite(content: &str) -> String {
        LinkRewriter::new(BASE).rewrite(content, PAGE)
    }

    #[test]
    fn test_markdown_link_and_image() {
        assert_eq!(
            rewrite("[Validate](../validate.md) ![Flow](./img/flow.png \"Flow\")"),
            "[Validate](https://wiki.vara.network/docs/vara-network/validate.md) \
             ![Flow](https://wiki.vara.network/docs/vara-network/staking/img/flow.png \"Flow\")"
        );
    }

    #[test]
    fn test_html_and_expression_attributes() {
        assert_eq!(
            rewrite(r#"<a href="rewards.md">r</a> <img src={'/img/logo.svg'} />"#),
            "<a href=\"https://wiki.vara.network/docs/vara-network/staking/rewards.md\">r</a> \
             <img src={'https://wiki.vara.network/docs/img/logo.svg'} />"
        );
    }

    #[test]
    fn test_fragment_preserved() {
        assert_eq!(
            rewrite("[v](../validate.md#section)"),
            "[v](https://wiki.vara.network/docs/vara-network/validate.md#section)"
        );
    }

    #[test]
    fn test_absolute_and_special_untouched() {
        let content = "[a](https://example.com/x) [b](mailto:a@b.com) [c](#anchor) \
                       <a href=\"//cdn.example.com\">d</a>";

        assert_eq!(rewrite(content), content);
    }

    #[test]
    fn test_fence_preservation() {
        let content = "before ```code [a](b.md)``` after [c](d.md)";

        assert_eq!(
            rewrite(content),
            "before ```code [a](b.md)``` after \
             [c](https://wiki.vara.network/docs/vara-network/staking/d.md)"
        );
    }

    #[test]
    fn test_fenced_block_byte_identical() {
        let fenced = "```html\n<img src=\"a.png\" />\n[x](y.md)\n```";
        let content = format!("Intro\n\n{fenced}\n");

        let out = rewrite(&content);

        assert!(out.contains(fenced));
    }

    #[test]
    fn test_front_matter_stripped() {
        assert_eq!(
            rewrite("---\ntitle: Nominate\n---\n# Nominate\n"),
            "# Nominate\n"
        );
    }

    #[test]
    fn test_idempotent_on_absolute_content() {
        let content = "[a](https://wiki.vara.network/docs/a.md) <img src=\"https://x.io/i.png\">";
        let once = rewrite(content);

        assert_eq!(rewrite(&once), once);
        assert_eq!(once, content);
    }

    #[test]
    fn test_second_pass_is_stable() {
        let once = rewrite("[a](../a.md) <a href=\"b.md\">b</a> <img src={\"c.png\"} />");

        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_malformed_input_unchanged() {
        let content = "[broken](no-close <a href=\"unterminated";

        assert_eq!(rewrite(content), content);
    }

    #[test]
    fn test_base_url() {
        assert_eq!(LinkRewriter::new("https://x.io/docs/").base_url(), "https://x.io/docs");
    }
}
