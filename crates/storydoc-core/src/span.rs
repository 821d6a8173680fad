//! Byte ranges into the source document.
//!
//! Block events carry the span of the source lines they were built from, so a
//! host can map styled output back to the manuscript (for example to jump to
//! the chapter heading a reader tapped).

/// A half-open byte range `[start, end)` in the source text.
///
/// Offsets are bytes, not characters. Line spans never include the line
/// terminator.
///
/// ```rust
/// use storydoc_core::span::Span;
///
/// let span = Span::new(2, 7);
/// assert_eq!(span.len(), 5);
/// assert_eq!(span.slice("# Title"), Some("Title"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The text this span covers, or `None` if it does not fall on valid
    /// character boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start as usize..self.end as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both_ranges() {
        let merged = Span::new(10, 14).merge(Span::new(3, 8));
        assert_eq!(merged, Span::new(3, 14));
    }

    #[test]
    fn slice_rejects_out_of_range() {
        assert_eq!(Span::new(4, 40).slice("short"), None);
        assert!(Span::new(5, 5).is_empty());
    }
}
