//! Display-width measurement for styled terminal text.
//!
//! Widths are counted in terminal columns: escape sequences take none, wide
//! (CJK, most emoji) glyphs take two, combining marks take zero.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Glyph appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// Resets every SGR attribute; closes styling cut off by truncation.
const RESET: &str = "\x1b[0m";

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// A run of text split into escape sequences and printable runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Escape(&'a str),
    Text(&'a str),
}

struct Pieces<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.rest.as_bytes().first()?;
        if first == ESC {
            let (seq, rest) = self.rest.split_at(escape_len(self.rest));
            self.rest = rest;
            return Some(Piece::Escape(seq));
        }
        let end = self.rest.find('\x1b').unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Piece::Text(run))
    }
}

fn pieces(s: &str) -> Pieces<'_> {
    Pieces { rest: s }
}

/// Byte length of the escape sequence at the start of `s` (which begins with
/// ESC).  Unterminated sequences swallow the rest of the string.
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        // CSI: parameters, then a final byte in 0x40..=0x7e.
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |p| p + 3),
        // OSC: terminated by BEL or ST (ESC \).
        Some(b']') => {
            let body = &bytes[2..];
            for (i, b) in body.iter().enumerate() {
                if *b == BEL {
                    return i + 3;
                }
                if *b == ESC && body.get(i + 1) == Some(&b'\\') {
                    return i + 4;
                }
            }
            bytes.len()
        }
        // Two-character escape (ESC + one char).
        Some(_) => s[1..].chars().next().map_or(1, |c| 1 + c.len_utf8()),
        None => 1,
    }
}

/// Number of terminal columns `s` occupies.
///
/// Each printable run is measured as a whole, so emoji presentation
/// selectors and ZWJ sequences count as the terminal draws them.
pub fn visible_width(s: &str) -> usize {
    pieces(s)
        .map(|p| match p {
            Piece::Text(run) => run.width(),
            Piece::Escape(_) => 0,
        })
        .sum()
}

/// Longest prefix of `s` fitting in `budget` columns, cut on grapheme
/// boundaries.  Escape sequences before the cut are kept; a reset is
/// appended if any were copied.
fn take_width(s: &str, budget: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut styled = false;

    for piece in pieces(s) {
        match piece {
            Piece::Escape(seq) => {
                out.push_str(seq);
                styled = true;
            }
            Piece::Text(run) => {
                let end = fitting_prefix(run, budget - used);
                out.push_str(&run[..end]);
                if end < run.len() {
                    break;
                }
                used += run.width();
            }
        }
    }

    if styled {
        out.push_str(RESET);
    }
    out
}

/// Byte length of the longest grapheme-aligned prefix of `run` that is at
/// most `budget` columns wide.
fn fitting_prefix(run: &str, budget: usize) -> usize {
    let mut end = 0;
    for (start, grapheme) in run.grapheme_indices(true) {
        let next = start + grapheme.len();
        if run[..next].width() > budget {
            break;
        }
        end = next;
    }
    end
}

/// Truncate `s` to at most `max_width` columns, ending with `ellipsis` when
/// anything was cut.  Text that already fits is returned unchanged.
pub fn truncate_to_width(s: &str, max_width: usize, ellipsis: &str) -> String {
    if visible_width(s) <= max_width {
        return s.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    if ellipsis_width > max_width {
        return take_width(ellipsis, max_width);
    }

    let mut out = take_width(s, max_width - ellipsis_width);
    out.push_str(ellipsis);
    out
}

/// Right-pad `s` with spaces up to `width` columns.
pub fn pad_to_width(mut s: String, width: usize) -> String {
    let current = visible_width(&s);
    if current < width {
        s.extend(std::iter::repeat(' ').take(width - current));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_excludes_escape_sequences() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width("\x1b[91mhello\x1b[0m"), 5);
        assert_eq!(visible_width("\x1b[38;2;255;0;0mred\x1b[39m"), 3);
        assert_eq!(visible_width("\x1b]8;;https://x.dev\x07link\x1b]8;;\x1b\\"), 4);
    }

    #[test]
    fn width_counts_columns_not_chars() {
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width("e\u{301}"), 1);
        assert_eq!(visible_width("█▉ ↑1.2k"), 8);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn emoji_sequences_take_two_columns() {
        assert_eq!(visible_width("❤\u{FE0F}"), 2);
        assert_eq!(visible_width("\x1b[33m⚠\u{FE0F}\x1b[0m ctx"), 6);
        assert_eq!(visible_width("👨\u{200D}👩\u{200D}👧"), 2);
    }

    #[test]
    fn truncate_keeps_emoji_sequences_whole() {
        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(truncate_to_width(&format!("{family}{family}"), 3, ELLIPSIS), format!("{family}…"));
        assert_eq!(truncate_to_width(&format!("a{family}"), 2, ELLIPSIS), "a…");
        assert_eq!(truncate_to_width("⚠\u{FE0F}ab", 3, ELLIPSIS), "⚠\u{FE0F}…");
    }

    #[test]
    fn unterminated_escape_is_swallowed() {
        assert_eq!(visible_width("ok\x1b[38;2"), 2);
        assert_eq!(visible_width("ok\x1b"), 2);
    }

    #[test]
    fn truncate_keeps_fitting_text() {
        assert_eq!(truncate_to_width("main", 4, ELLIPSIS), "main");
        assert_eq!(truncate_to_width("main", 10, ELLIPSIS), "main");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("feature/login", 6, ELLIPSIS), "featu…");
        assert_eq!(truncate_to_width("feature/login", 1, ELLIPSIS), "…");
        assert_eq!(truncate_to_width("feature/login", 0, ELLIPSIS), "");
    }

    #[test]
    fn truncate_never_splits_wide_glyphs() {
        // Two columns left for text: the second ideograph doesn't fit.
        let cut = truncate_to_width("日本語", 4, ELLIPSIS);
        assert_eq!(cut, "日…");
        assert_eq!(visible_width(&cut), 3);
    }

    #[test]
    fn truncate_keeps_combining_marks_with_their_base() {
        assert_eq!(truncate_to_width("e\u{301}e\u{301}e\u{301}", 2, ELLIPSIS), "e\u{301}…");
    }

    #[test]
    fn truncate_preserves_and_closes_styling() {
        let cut = truncate_to_width("\x1b[31mhello\x1b[0m", 3, ELLIPSIS);
        assert!(cut.starts_with("\x1b[31mhe"));
        assert!(cut.ends_with(&format!("{RESET}{ELLIPSIS}")));
        assert_eq!(visible_width(&cut), 3);
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad_to_width("ab".into(), 4), "ab  ");
        assert_eq!(pad_to_width("abcd".into(), 2), "abcd");
    }
}
