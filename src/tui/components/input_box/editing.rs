//! Pure string helpers for the InputBox. Byte offsets in, byte offsets out.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Terminal columns occupied by `text`.
pub(super) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// The part of `text` that falls in columns `skip..skip + width`.
///
/// A wide character straddling either edge is dropped rather than split.
pub(super) fn visible_slice(text: &str, skip: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if col >= skip && col + w <= skip + width {
            out.push(c);
        }
        col += w;
        if col >= skip + width {
            break;
        }
    }
    out
}
