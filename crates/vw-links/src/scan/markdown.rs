//! Inline markdown links and images: `[text](url "title")`, `![alt](url)`.
//!
//! Handled explicitly:
//! - Link text may contain balanced brackets, so an image nested in a link
//!   (`[![alt](a.png)](b.md)`) yields both targets.
//! - Backslash-escaped brackets and parentheses are literal.
//! - Destinations may contain balanced parentheses, or be wrapped in `<...>`.
//! - An optional title after the destination is left untouched, including
//!   any `)` inside a quoted title.
//!
//! Reference-style links (`[text][ref]`) are not links for this purpose.

use std::ops::Range;

use super::{LinkKind, LinkRef};

/// Find all inline link and image destinations in `text`.
pub(crate) fn scan(text: &str) -> Vec<LinkRef<'_>> {
    let mut links = Vec::new();
    scan_range(text, 0, text.len(), &mut links);
    links
}

fn scan_range<'a>(text: &'a str, start: usize, end: usize, links: &mut Vec<LinkRef<'a>>) {
    let bytes = text.as_bytes();
    let mut pos = start;

    while pos < end {
        if bytes[pos] == b'[' && !is_escaped(bytes, pos) {
            if let Some(link) = parse_link(bytes, pos, end) {
                // Links nested in the text come first.
                scan_range(text, pos + 1, link.text_end, links);
                let is_image = pos > 0 && bytes[pos - 1] == b'!' && !is_escaped(bytes, pos - 1);
                let kind = if is_image {
                    LinkKind::MarkdownImage
                } else {
                    LinkKind::MarkdownLink
                };
                links.push(LinkRef::new(text, kind, link.url));
                pos = link.end;
                continue;
            }
        }
        pos += 1;
    }
}

struct Parsed {
    /// Index of the closing `]`.
    text_end: usize,
    url: Range<usize>,
    /// Index just past the closing `)`.
    end: usize,
}

fn parse_link(bytes: &[u8], open: usize, limit: usize) -> Option<Parsed> {
    let text_end = closing_bracket(bytes, open, limit)?;
    if bytes.get(text_end + 1) != Some(&b'(') {
        return None;
    }
    let (url, after_url) = destination(bytes, text_end + 2, limit)?;
    let end = closing_paren(bytes, after_url, limit)?;
    Some(Parsed {
        text_end,
        url,
        end,
    })
}

/// Find the `]` matching the `[` at `open`.
fn closing_bracket(bytes: &[u8], open: usize, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    while pos < limit {
        match bytes[pos] {
            b'\\' => pos += 1,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Parse a link destination starting at `start` (just past `(`).
///
/// Returns the URL span and the position after it.
fn destination(bytes: &[u8], start: usize, limit: usize) -> Option<(Range<usize>, usize)> {
    if bytes.get(start) == Some(&b'<') {
        let mut pos = start + 1;
        while pos < limit {
            match bytes[pos] {
                b'\\' => pos += 1,
                b'>' => return (pos > start + 1).then_some((start + 1..pos, pos + 1)),
                b'\n' | b'<' => return None,
                _ => {}
            }
            pos += 1;
        }
        return None;
    }

    let mut depth = 0usize;
    let mut pos = start;
    while pos < limit {
        match bytes[pos] {
            b'\\' => pos += 1,
            b'(' => depth += 1,
            b')' if depth == 0 => break,
            b')' => depth -= 1,
            b if b.is_ascii_whitespace() => break,
            _ => {}
        }
        pos += 1;
    }
    let pos = pos.min(limit);
    (pos > start && depth == 0).then_some((start..pos, pos))
}

/// Skip an optional title and find the `)` that closes the link.
///
/// Returns the index just past it.
fn closing_paren(bytes: &[u8], start: usize, limit: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut pos = start;
    while pos < limit {
        let byte = bytes[pos];
        match quote {
            Some(q) if byte == q => quote = None,
            Some(_) => {}
            None => match byte {
                b')' => return Some(pos + 1),
                b'"' | b'\'' => quote = Some(byte),
                _ => {}
            },
        }
        pos += 1;
    }
    None
}

/// Check whether the byte at `pos` is preceded by an odd number of backslashes.
fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    bytes[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}
