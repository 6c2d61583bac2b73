//! JSX expression attributes holding a string literal: `src={'url'}`,
//! `href={"url"}`.
//!
//! Whitespace inside the braces is allowed. Template literals and any other
//! expression are skipped, as is a literal containing a quote character.

use super::{LinkKind, LinkRef, attribute_values, ordered};

/// Find all string-literal `src`/`href` expression values in `text`.
pub(crate) fn scan(text: &str) -> Vec<LinkRef<'_>> {
    let bytes = text.as_bytes();
    let links = attribute_values(text)
        .filter_map(|start| {
            if bytes.get(start) != Some(&b'{') {
                return None;
            }
            let quote_pos = skip_whitespace(bytes, start + 1);
            let quote = *bytes.get(quote_pos).filter(|&&b| b == b'"' || b == b'\'')?;
            let value_start = quote_pos + 1;
            let len = bytes[value_start..]
                .iter()
                .position(|&b| b == b'"' || b == b'\'')?;
            let value_end = value_start + len;
            if len == 0 || bytes[value_end] != quote {
                return None;
            }
            let close = skip_whitespace(bytes, value_end + 1);
            (bytes.get(close) == Some(&b'}')).then(|| {
                LinkRef::new(text, LinkKind::ExpressionAttribute, value_start..value_end)
            })
        })
        .collect();
    ordered(links)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}
