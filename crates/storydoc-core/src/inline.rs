//! Inline stylist: bold and italic spans within one block.
//!
//! Recognizes three markers as one alternation, scanned left to right,
//! leftmost match wins, non-overlapping and non-nested:
//!
//! - `**text**` bold, lazy: ends at the first following `**`
//! - `__text__` bold, same rule
//! - `_text_` italic, where the content holds no `_` at all
//!
//! Bold content may contain anything except a newline, including `_` and a
//! lone `*`. When several markers could start at one position they are tried
//! in the order above. Delimiters never reach the output; an empty pair
//! (`****`) produces no run. Anything that does not close stays literal.
//!
//! Uses `memchr` to jump between candidate delimiters and borrows every run
//! from the input.

use memchr::{memchr, memchr2, memmem};

use crate::ast::{CowStr, StyledRun};
use crate::style::{Emphasis, StyleKind, TextStyle};

/// Split `text` into runs styled from `base`.
///
/// `role` is recorded on every run so hosts can tell which base style a run
/// came from.
///
/// ```rust
/// use storydoc_core::style::{Emphasis, StyleKind, TextStyle};
/// use storydoc_core::stylize;
///
/// let base = TextStyle::new(17.0).unwrap();
/// let runs = stylize("a **b** _c_", &base, StyleKind::Normal);
/// let parts: Vec<_> = runs.iter().map(|r| (r.text.as_ref(), r.emphasis)).collect();
/// assert_eq!(parts, vec![
///     ("a ", Emphasis::Plain),
///     ("b", Emphasis::Bold),
///     (" ", Emphasis::Plain),
///     ("c", Emphasis::Italic),
/// ]);
/// ```
pub fn stylize<'a>(text: &'a str, base: &TextStyle, role: StyleKind) -> Vec<StyledRun<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    InlineScanner::new(text, *base, role).scan()
}

/// A recognized marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    /// Offset of the opening delimiter.
    start: usize,
    content_start: usize,
    content_end: usize,
    /// Offset just past the closing delimiter.
    end: usize,
    emphasis: Emphasis,
}

struct InlineScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    base: TextStyle,
    role: StyleKind,
}

impl<'a> InlineScanner<'a> {
    #[inline]
    fn new(text: &'a str, base: TextStyle, role: StyleKind) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            base,
            role,
        }
    }

    fn scan(&mut self) -> Vec<StyledRun<'a>> {
        let mut runs = Vec::with_capacity(4);
        // Start of literal text not yet emitted.
        let mut cursor = 0;

        while let Some(candidate) = memchr2(b'*', b'_', &self.bytes[self.pos..]) {
            self.pos += candidate;

            let Some(marker) = self.match_at(self.pos) else {
                self.pos += 1;
                continue;
            };

            self.push(&mut runs, cursor, marker.start, Emphasis::Plain);
            self.push(&mut runs, marker.content_start, marker.content_end, marker.emphasis);
            self.pos = marker.end;
            cursor = marker.end;
        }

        self.push(&mut runs, cursor, self.bytes.len(), Emphasis::Plain);
        runs
    }

    /// Try each marker at `at`, in alternation order.
    #[inline]
    fn match_at(&self, at: usize) -> Option<Marker> {
        let rest = &self.bytes[at..];
        if rest.starts_with(b"**") {
            return self.match_bold(at, b"**");
        }
        if rest.starts_with(b"__") {
            // `_` can't start italic here: its content would begin with `_`.
            return self.match_bold(at, b"__");
        }
        if rest.first() == Some(&b'_') {
            return self.match_italic(at);
        }
        None
    }

    /// Lazy bold: content runs to the first closing pair and may be empty,
    /// but can't cross a newline.
    #[inline]
    fn match_bold(&self, at: usize, delim: &[u8]) -> Option<Marker> {
        let content_start = at + delim.len();
        let content_end = content_start + memmem::find(&self.bytes[content_start..], delim)?;

        if memchr(b'\n', &self.bytes[content_start..content_end]).is_some() {
            return None;
        }

        Some(Marker {
            start: at,
            content_start,
            content_end,
            end: content_end + delim.len(),
            emphasis: Emphasis::Bold,
        })
    }

    /// Italic: one or more non-underscore characters, then `_`.
    #[inline]
    fn match_italic(&self, at: usize) -> Option<Marker> {
        let content_start = at + 1;
        if matches!(self.bytes.get(content_start), None | Some(b'_')) {
            return None;
        }

        let content_end = content_start + memchr(b'_', &self.bytes[content_start..])?;

        Some(Marker {
            start: at,
            content_start,
            content_end,
            end: content_end + 1,
            emphasis: Emphasis::Italic,
        })
    }

    /// Emit `text[start..end]` unless it's empty. Borrows from the input.
    #[inline(always)]
    fn push(&self, runs: &mut Vec<StyledRun<'a>>, start: usize, end: usize, emphasis: Emphasis) {
        if start >= end {
            return;
        }
        runs.push(StyledRun {
            text: CowStr::Borrowed(&self.text[start..end]),
            style: self.base.derive(emphasis),
            role: self.role,
            emphasis,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> Vec<(&str, Emphasis)> {
        let base = TextStyle::new(17.0).unwrap();
        stylize(text, &base, StyleKind::Normal)
            .into_iter()
            .map(|run| match run.text {
                CowStr::Borrowed(s) => (s, run.emphasis),
                CowStr::Owned(_) => panic!("run was copied"),
            })
            .collect()
    }

    use Emphasis::{Bold, Italic, Plain};

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(parts("no markup here"), vec![("no markup here", Plain)]);
        assert!(parts("").is_empty());
    }

    #[test]
    fn bold_is_lazy() {
        assert_eq!(
            parts("**a** and **b**"),
            vec![("a", Bold), (" and ", Plain), ("b", Bold)]
        );
    }

    #[test]
    fn bold_content_may_hold_underscores_and_stars() {
        assert_eq!(parts("**snake_case**"), vec![("snake_case", Bold)]);
        assert_eq!(parts("***x**"), vec![("*x", Bold)]);
        assert_eq!(parts("__a_b__"), vec![("a_b", Bold)]);
    }

    #[test]
    fn underscore_bold_wins_over_italic() {
        assert_eq!(parts("__bold__ _it_"), vec![("bold", Bold), (" ", Plain), ("it", Italic)]);
    }

    #[test]
    fn leftmost_marker_wins() {
        // Italic opens first, so the `**` inside it is ordinary content.
        assert_eq!(parts("_a **b_ c**"), vec![("a **b", Italic), (" c**", Plain)]);
        assert_eq!(parts("**a _b** c_"), vec![("a _b", Bold), (" c_", Plain)]);
    }

    #[test]
    fn italic_needs_content_without_underscores() {
        assert_eq!(parts("__"), vec![("__", Plain)]);
        assert_eq!(parts("_"), vec![("_", Plain)]);
        assert_eq!(parts("_open"), vec![("_open", Plain)]);
        // Only the last underscore of the run can open the italic span.
        assert_eq!(parts("a___b_"), vec![("a__", Plain), ("b", Italic)]);
    }

    #[test]
    fn empty_pairs_emit_nothing() {
        assert!(parts("****").is_empty());
        assert!(parts("____").is_empty());
        assert_eq!(parts("x****y"), vec![("x", Plain), ("y", Plain)]);
    }

    #[test]
    fn empty_pair_is_taken_before_a_longer_bold() {
        // `****` closes as an empty pair first, leaving `x**` unmatched.
        assert_eq!(parts("****x**"), vec![("x**", Plain)]);
        assert_eq!(parts("____x__"), vec![("x__", Plain)]);
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(parts("**open"), vec![("**open", Plain)]);
        assert_eq!(parts("2 * 3 = 6"), vec![("2 * 3 = 6", Plain)]);
        assert_eq!(parts("a *b* c"), vec![("a *b* c", Plain)]);
    }

    #[test]
    fn bold_does_not_cross_newlines() {
        assert_eq!(parts("**a\nb**"), vec![("**a\nb**", Plain)]);
        assert_eq!(parts("_a\nb_"), vec![("a\nb", Italic)]);
    }

    #[test]
    fn runs_carry_derived_styles() {
        let base = TextStyle::new(22.0).unwrap().bold();
        let runs = stylize("x _y_", &base, StyleKind::Chapter);
        assert_eq!(runs[0].style, base);
        assert_eq!(runs[1].style.size, 22.0);
        assert!(runs[1].style.traits.bold && runs[1].style.traits.italic);
        assert!(runs.iter().all(|run| run.role == StyleKind::Chapter));
    }

    #[test]
    fn multibyte_text_is_sliced_on_boundaries() {
        assert_eq!(
            parts("café _naïve_ **日本**"),
            vec![("café ", Plain), ("naïve", Italic), (" ", Plain), ("日本", Bold)]
        );
    }
}
