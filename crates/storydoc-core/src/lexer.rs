//! Line splitter for the block classifier.
//!
//! Splits input on `\n` with `memchr` (SIMD on supported platforms) and hands
//! out borrowed lines with their byte spans.
//!
//! Every line is kept, including the empty ones between consecutive newlines
//! and the empty line after a trailing newline. The empty document has no
//! lines at all.

use crate::span::Span;
use memchr::memchr;

/// A single source line, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// Byte span in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// True if the line is empty or whitespace only.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Line-by-line reader over a document.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Start of the next unread line.
    offset: usize,
    /// Whether a line (possibly empty) still starts at `offset`.
    pending: bool,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            pending: !input.is_empty(),
        }
    }

    /// Current byte offset.
    #[inline(always)]
    pub fn offset(&self) -> u32 {
        self.offset as u32
    }

    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        !self.pending
    }

    /// Consume and return the next line, or `None` once input is exhausted.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if !self.pending {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => {
                self.offset = start + pos + 1;
                start + pos
            }
            None => {
                self.offset = self.bytes.len();
                self.pending = false;
                self.bytes.len()
            }
        };

        // CRLF: drop the carriage return before the newline
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        // `\n` and `\r` are ASCII, so both ends sit on char boundaries.
        Some(Line {
            text: &self.input[start..text_end],
            span: Span::new(start as u32, text_end as u32),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
