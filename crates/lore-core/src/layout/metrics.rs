//! Font metrics and word-wrap primitives
//!
//! The engine measures everything through [`FontMetrics`] so the core stays
//! independent of any particular rendering backend. Glyphs a provider cannot
//! measure are zero-width, never errors.

use unicode_width::UnicodeWidthChar;

/// Which of the two measured faces a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Proportional,
    Mono,
}

/// Measurement provider for one backend.
///
/// The unit-dependent layout constants live here too: defaults suit a small
/// pixel bitmap font, and cell-based providers override them with cell-sized
/// values.
pub trait FontMetrics {
    /// Advance width of a single proportional glyph.
    fn char_width(&self, c: char) -> i32;

    /// Advance width of a single monospace glyph.
    fn mono_char_width(&self, c: char) -> i32;

    /// Height of one text line.
    fn line_height(&self) -> i32;

    fn string_width(&self, s: &str) -> i32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn mono_string_width(&self, s: &str) -> i32 {
        s.chars().map(|c| self.mono_char_width(c)).sum()
    }

    fn space_width(&self) -> i32 {
        self.char_width(' ')
    }

    fn face_width(&self, face: FontFace, s: &str) -> i32 {
        match face {
            FontFace::Proportional => self.string_width(s),
            FontFace::Mono => self.mono_string_width(s),
        }
    }

    /// Indent applied per list nesting level; also the marker gutter width.
    fn list_indent(&self) -> i32 {
        15
    }

    /// Indent applied inside block quotes.
    fn quote_indent(&self) -> i32 {
        8
    }

    /// Symmetric padding around code-block panels.
    fn code_padding(&self) -> i32 {
        5
    }

    /// Horizontal padding inside each table cell.
    fn cell_padding(&self) -> i32 {
        2
    }

    /// Horizontal inset of thematic-break rules from each edge.
    fn rule_inset(&self) -> i32 {
        5
    }
}

/// Byte length of the longest prefix of `s` that fits in `width`.
///
/// Greedy first-fit: widths accumulate until the next glyph would overflow.
/// An exact fill is kept on the line. When the overflow lands mid-word and a
/// space was seen earlier, the cut moves back to that space; newlines always
/// cut. Returns 0 when not even the first glyph fits.
pub fn size_to_width<M: FontMetrics + ?Sized>(
    metrics: &M,
    s: &str,
    width: i32,
    face: FontFace,
) -> usize {
    let mut used = 0i32;
    let mut last_space: Option<usize> = None;

    for (i, c) in s.char_indices() {
        if c == '\n' {
            return i;
        }
        if c == ' ' {
            last_space = Some(i);
        }
        used += match face {
            FontFace::Proportional => metrics.char_width(c),
            FontFace::Mono => metrics.mono_char_width(c),
        };
        if used > width {
            return match last_space {
                Some(space) if space < i => space,
                _ => i,
            };
        }
    }
    s.len()
}

/// Greedy first-fit wrap of `s` into lines no wider than `width`.
///
/// Exactly one separator (space or newline) is consumed at each break point.
/// A word wider than `width` is force-cut one glyph at a time rather than
/// dropped. Always returns at least one line.
pub fn wrap<M: FontMetrics + ?Sized>(
    metrics: &M,
    s: &str,
    width: i32,
    face: FontFace,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = s;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('\n') {
            lines.push(String::new());
            rest = tail;
            continue;
        }
        let mut cut = size_to_width(metrics, rest, width, face);
        if cut == 0 {
            // Nothing fits; force one glyph to guarantee progress.
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        lines.push(rest[..cut].to_string());
        rest = &rest[cut..];
        if let Some(c) = rest.chars().next() {
            if c == ' ' || c == '\n' {
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Metrics for a terminal backend: one cell per column, one row per line.
///
/// Widths come from Unicode East Asian width, so wide glyphs cost two columns
/// and zero-width marks cost nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics;

impl FontMetrics for CellMetrics {
    fn char_width(&self, c: char) -> i32 {
        UnicodeWidthChar::width(c).unwrap_or(0) as i32
    }

    fn mono_char_width(&self, c: char) -> i32 {
        self.char_width(c)
    }

    fn line_height(&self) -> i32 {
        1
    }

    fn list_indent(&self) -> i32 {
        3
    }

    fn quote_indent(&self) -> i32 {
        2
    }

    fn code_padding(&self) -> i32 {
        1
    }

    fn cell_padding(&self) -> i32 {
        1
    }

    fn rule_inset(&self) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fill_stays_on_the_line() {
        let m = CellMetrics;
        assert_eq!(size_to_width(&m, "abcd", 4, FontFace::Mono), 4);
        assert_eq!(size_to_width(&m, "abcde", 4, FontFace::Mono), 4);
    }

    #[test]
    fn cut_moves_back_to_last_space() {
        let m = CellMetrics;
        // "hello wor|ld" at width 9 cuts at the space.
        assert_eq!(size_to_width(&m, "hello world", 9, FontFace::Mono), 5);
    }

    #[test]
    fn newline_always_cuts() {
        let m = CellMetrics;
        assert_eq!(size_to_width(&m, "ab\ncdef", 100, FontFace::Mono), 2);
    }

    #[test]
    fn wrap_consumes_one_separator_per_break() {
        let m = CellMetrics;
        let lines = wrap(&m, "aa bb cc", 2, FontFace::Mono);
        assert_eq!(lines, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn wrap_force_cuts_oversized_words() {
        let m = CellMetrics;
        let lines = wrap(&m, "abcdef", 2, FontFace::Mono);
        assert_eq!(lines, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        let m = CellMetrics;
        let lines = wrap(&m, "a\n\nb", 10, FontFace::Mono);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn unmeasurable_glyphs_are_zero_width() {
        let m = CellMetrics;
        // Combining mark: zero columns, never an error.
        assert_eq!(m.char_width('\u{0301}'), 0);
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let m = CellMetrics;
        let text = "the quick brown fox jumps over the lazy dog again and again";
        for width in [3, 5, 8, 13, 21, 34] {
            for line in wrap(&m, text, width, FontFace::Proportional) {
                // Longest word is 5 columns; anything wider must be a
                // force-cut fragment, which never exceeds the width either.
                assert!(m.string_width(&line) <= width.max(5));
            }
        }
    }
}
