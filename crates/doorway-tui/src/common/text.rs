//! Text utilities for form rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MASK_CHAR: char = '•';

/// Keeps the tail of `text` so the caret end stays visible, prefixing `…`
/// when characters were dropped. Widths are terminal columns.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

/// One mask character per input character.
pub fn mask(text: &str) -> String {
    text.chars().map(|_| MASK_CHAR).collect()
}
