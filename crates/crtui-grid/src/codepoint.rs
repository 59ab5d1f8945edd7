#![forbid(unsafe_code)]

//! Codepoint-boundary string helpers.
//!
//! Layout arithmetic counts UTF-8 codepoints, not bytes, so multi-byte
//! names neither split mid-encoding nor inflate column widths. Grapheme
//! clustering is out of scope: one codepoint, one cell.

use std::borrow::Cow;

/// The single codepoint spliced into middle-truncated text.
pub const ELLIPSIS: char = '\u{2026}';

/// Codepoint count of `s`.
#[must_use]
pub fn len(s: &str) -> usize {
    s.chars().count()
}

/// Substring of `count` codepoints starting at codepoint `start`.
///
/// Out-of-range indices clamp to the end of the string.
#[must_use]
pub fn slice(s: &str, start: usize, count: usize) -> &str {
    let begin = byte_offset(s, start);
    let end = begin + byte_offset(&s[begin..], count);
    &s[begin..end]
}

/// Byte offset of the codepoint at index `codepoints`, clamped to `s.len()`.
fn byte_offset(s: &str, codepoints: usize) -> usize {
    s.char_indices()
        .nth(codepoints)
        .map_or(s.len(), |(offset, _)| offset)
}

/// Shorten `s` to at most `width` codepoints by keeping a head segment and
/// a tail segment joined by one [`ELLIPSIS`].
///
/// Strings already within `width` come back borrowed and untouched.
#[must_use]
pub fn truncate_middle(s: &str, width: usize) -> Cow<'_, str> {
    let total = len(s);
    if total <= width {
        return Cow::Borrowed(s);
    }
    if width == 0 {
        return Cow::Borrowed("");
    }

    let head = (width / 2).saturating_sub(1);
    let tail = width / 2;
    let mut out = String::with_capacity(s.len());
    out.push_str(slice(s, 0, head));
    out.push(ELLIPSIS);
    out.push_str(slice(s, total - tail, tail));
    Cow::Owned(out)
}
