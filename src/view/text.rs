//! Text measurement and wrapping.
//!
//! Everything here is display-cell aware: widths come from unicode-width,
//! prefixes are cut at grapheme boundaries so a mid-reveal string never
//! splits a character.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> u16 {
    text.width() as u16
}

/// The first `n` graphemes of a string.
pub fn take_graphemes(text: &str, n: usize) -> &str {
    match text.grapheme_indices(true).nth(n) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Number of graphemes in a string.
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Greedy word wrap to a maximum display width.
///
/// Words longer than the width are split hard. Returns at least one line
/// (possibly empty) so callers can always index line 0.
pub fn wrap_text(text: &str, max_width: u16) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width: u16 = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);

        // Hard-split words wider than the line
        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut piece = String::new();
            let mut piece_width: u16 = 0;
            for grapheme in word.graphemes(true) {
                let gw = display_width(grapheme);
                if piece_width + gw > max_width {
                    lines.push(std::mem::take(&mut piece));
                    piece_width = 0;
                }
                piece.push_str(grapheme);
                piece_width += gw;
            }
            current = piece;
            current_width = piece_width;
            continue;
        }

        let separator = if current.is_empty() { 0 } else { 1 };
        if current_width + separator + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| display_width(l) <= 10));
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_wrap_preserves_word_order() {
        let lines = wrap_text("alpha beta gamma", 11);
        let joined = lines.join(" ");
        assert_eq!(joined, "alpha beta gamma");
    }

    #[test]
    fn test_wrap_empty_gives_one_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_take_graphemes_at_boundaries() {
        assert_eq!(take_graphemes("hello", 3), "hel");
        assert_eq!(take_graphemes("hello", 99), "hello");
        assert_eq!(take_graphemes("hello", 0), "");
        // Combining mark stays with its base
        assert_eq!(take_graphemes("e\u{301}x", 1), "e\u{301}");
    }

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("abc"), 3);
        assert_eq!(grapheme_count("e\u{301}x"), 2);
    }
}
