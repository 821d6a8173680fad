//! Block classifier.
//!
//! Walks the document line by line and decides what each line is. Headings,
//! separators, section markers and blank lines become events on their own;
//! runs of plain lines are reflowed into a single paragraph (joined with one
//! space) until a blank line or a structural line interrupts them.
//!
//! Precedence, first match wins:
//!
//! 1. blank line
//! 2. `# Title: ` prefix
//! 3. `## Author: ` prefix
//! 4. `## Year: ` prefix
//! 5. `## ` prefix (chapter)
//! 6. exactly `-------`
//! 7. `*<digits>*` (section)
//! 8. paragraph text

use tracing::{debug, trace};

use crate::ast::{BlockEvent, BlockKind, CowStr};
use crate::lexer::{Lexer, Line};
use crate::span::Span;

const TITLE_PREFIX: &str = "# Title: ";
const AUTHOR_PREFIX: &str = "## Author: ";
const YEAR_PREFIX: &str = "## Year: ";
const CHAPTER_PREFIX: &str = "## ";
const SEPARATOR: &str = "-------";

/// Classify every line of `input` into block events, in document order.
///
/// Total over all inputs. The empty document yields no events.
///
/// ```rust
/// use storydoc_core::{classify, BlockKind};
///
/// let events = classify("## Chapter One\nIt was\ndark.");
/// assert_eq!(events[0].kind, BlockKind::Chapter);
/// assert_eq!(events[1].text, "It was dark.");
/// ```
pub fn classify(input: &str) -> Vec<BlockEvent<'_>> {
    let mut classifier = Classifier::new();
    let mut lines = 0usize;

    for line in Lexer::new(input) {
        lines += 1;
        classifier.push_line(line);
    }

    let events = classifier.finish();
    debug!(lines, events = events.len(), "classified document");
    events
}

/// What a single trimmed line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass<'a> {
    Block(BlockKind, &'a str),
    Text(&'a str),
}

fn classify_line<'a>(line: &Line<'a>) -> LineClass<'a> {
    let trimmed = line.trimmed();
    if trimmed.is_empty() {
        return LineClass::Block(BlockKind::Blank, "");
    }

    // Prefixes keep their trailing space, so test them before the line's
    // own trailing whitespace is gone. The payload keeps any whitespace
    // that follows the prefix.
    let lead = line.text.trim_start();
    let headings = [
        (TITLE_PREFIX, BlockKind::Title),
        (AUTHOR_PREFIX, BlockKind::Author),
        (YEAR_PREFIX, BlockKind::Year),
        (CHAPTER_PREFIX, BlockKind::Chapter),
    ];
    for (prefix, kind) in headings {
        if let Some(rest) = lead.strip_prefix(prefix) {
            return LineClass::Block(kind, rest.trim_end());
        }
    }

    if trimmed == SEPARATOR {
        return LineClass::Block(BlockKind::Separator, "");
    }

    if is_section_marker(trimmed) {
        return LineClass::Block(BlockKind::Section, trimmed);
    }

    LineClass::Text(trimmed)
}

/// `*` + one or more ASCII digits + `*`, nothing else.
#[inline]
fn is_section_marker(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 3
        && bytes[0] == b'*'
        && bytes[bytes.len() - 1] == b'*'
        && bytes[1..bytes.len() - 1].iter().all(u8::is_ascii_digit)
}

/// Accumulates events and the lines of the paragraph in progress.
struct Classifier<'a> {
    events: Vec<BlockEvent<'a>>,
    paragraph: Vec<&'a str>,
    paragraph_span: Option<Span>,
}

impl<'a> Classifier<'a> {
    fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
            paragraph: Vec::with_capacity(8),
            paragraph_span: None,
        }
    }

    fn push_line(&mut self, line: Line<'a>) {
        match classify_line(&line) {
            LineClass::Text(text) => {
                self.paragraph.push(text);
                self.paragraph_span = Some(match self.paragraph_span {
                    Some(span) => span.merge(line.span),
                    None => line.span,
                });
            }
            LineClass::Block(kind, payload) => {
                self.flush_paragraph();
                trace!(%kind, payload, start = line.span.start, "block line");
                self.events.push(BlockEvent::new(kind, payload, line.span));
            }
        }
    }

    /// Turn the buffered lines into a paragraph event, if there are any.
    fn flush_paragraph(&mut self) {
        let Some(span) = self.paragraph_span.take() else {
            return;
        };

        // Buffered lines are already trimmed and non-blank, so the joined
        // text needs no further trimming.
        let text: CowStr<'a> = match self.paragraph.as_slice() {
            [single] => CowStr::Borrowed(*single),
            lines => CowStr::Owned(lines.join(" ")),
        };
        self.paragraph.clear();

        if text.is_empty() {
            return;
        }
        trace!(len = text.len(), start = span.start, "paragraph");
        self.events
            .push(BlockEvent::new(BlockKind::Paragraph, text, span));
    }

    fn finish(mut self) -> Vec<BlockEvent<'a>> {
        self.flush_paragraph();
        self.events
    }
}
