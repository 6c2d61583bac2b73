//! Link target tokenizers.
//!
//! Each submodule recognises one construct and reports the byte span of the
//! URL inside it. Scanners never fail: text that doesn't form a complete
//! construct is skipped.

pub(crate) mod expression;
pub(crate) mod html;
pub(crate) mod markdown;

use std::ops::Range;

/// Syntax a link target was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[text](url)`
    MarkdownLink,
    /// `![alt](url)`
    MarkdownImage,
    /// `src="url"` / `href="url"`
    HtmlAttribute,
    /// `src={'url'}` / `href={"url"}`
    ExpressionAttribute,
}

/// A link target located in a text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef<'a> {
    /// The URL exactly as written.
    pub raw_url: &'a str,
    pub kind: LinkKind,
    /// Byte range of `raw_url` in the scanned text.
    pub span: Range<usize>,
}

impl<'a> LinkRef<'a> {
    pub(crate) fn new(text: &'a str, kind: LinkKind, span: Range<usize>) -> Self {
        Self {
            raw_url: &text[span.clone()],
            kind,
            span,
        }
    }
}

/// Attribute names whose values are link targets.
const LINK_ATTRIBUTES: &[&str] = &["src", "href"];

/// Find `src`/`href` attribute names followed by `=` and return the offset
/// just past the `=`, skipping whitespace around it.
///
/// The name must not be preceded by a word character, so `data-src` counts
/// but `xsrc` doesn't.
pub(crate) fn attribute_values(text: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    LINK_ATTRIBUTES
        .iter()
        .flat_map(move |name| text.match_indices(name).map(move |(pos, _)| (pos, name.len())))
        .filter(move |&(pos, _)| pos == 0 || !is_word_byte(bytes[pos - 1]))
        .filter_map(move |(pos, len)| {
            let after_name = skip_spaces(bytes, pos + len);
            (bytes.get(after_name) == Some(&b'=')).then(|| skip_spaces(bytes, after_name + 1))
        })
}

/// Sort links by position and drop any that overlap an earlier one.
pub(crate) fn ordered(mut links: Vec<LinkRef<'_>>) -> Vec<LinkRef<'_>> {
    links.sort_by_key(|link| link.span.start);
    let mut end = 0;
    links.retain(|link| {
        let keep = link.span.start >= end;
        if keep {
            end = link.span.end;
        }
        keep
    });
    links
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| *b == b' ' || *b == b'\t') {
        pos += 1;
    }
    pos
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
