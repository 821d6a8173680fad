//! Block assembly: classify, stylize, and join blocks with line breaks.
//!
//! Spacing after each block:
//!
//! | Block | Runs | Line breaks after |
//! |---|---|---|
//! | Title, Author, Chapter, Section | payload (one empty run if blank) | two |
//! | Paragraph | payload | one |
//! | Year | none | one, unless output already ends in a break |
//! | Separator, Blank | none | one, unless output already ends in two |
//!
//! Afterwards every run of three or more breaks collapses to two, and
//! non-empty output is padded to end in exactly two breaks.

use tracing::debug;

use crate::ast::{BlockEvent, BlockKind, CowStr, Fragment, RichText, StyledRun};
use crate::block::classify;
use crate::inline::stylize;
use crate::style::{Emphasis, StyleKind, StyleSheet};

/// Longest run of consecutive line breaks kept in the output.
const MAX_BREAKS: usize = 2;

/// Convert `input` into styled runs using `styles`.
///
/// ```rust
/// use storydoc_core::style::{StyleSheet, TextStyle};
/// use storydoc_core::render;
///
/// let styles = StyleSheet::from_fn(|_| TextStyle::new(16.0).unwrap());
/// let text = render("## One\nHello **there**.", &styles);
/// assert_eq!(text.plain_text(), "One\n\nHello there.\n\n");
/// ```
pub fn render<'a>(input: &'a str, styles: &StyleSheet) -> RichText<'a> {
    Renderer::new(styles).render(input)
}

/// Renders documents against one style sheet.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'s> {
    styles: &'s StyleSheet,
}

impl<'s> Renderer<'s> {
    pub fn new(styles: &'s StyleSheet) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &'s StyleSheet {
        self.styles
    }

    pub fn render<'a>(&self, input: &'a str) -> RichText<'a> {
        self.render_events(classify(input))
    }

    /// Assemble already classified events.
    pub fn render_events<'a>(&self, events: Vec<BlockEvent<'a>>) -> RichText<'a> {
        let event_count = events.len();
        let mut out = Output::default();

        for event in events {
            match event.kind {
                BlockKind::Title | BlockKind::Author | BlockKind::Chapter | BlockKind::Section => {
                    self.push_text(&mut out, event);
                    out.push_breaks(2);
                }
                BlockKind::Paragraph => {
                    self.push_text(&mut out, event);
                    out.push_breaks(1);
                }
                BlockKind::Year => {
                    if out.trailing_breaks() < 1 {
                        out.push_breaks(1);
                    }
                }
                BlockKind::Separator | BlockKind::Blank => {
                    if out.trailing_breaks() < 2 {
                        out.push_breaks(1);
                    }
                }
            }
        }

        let text = out.finish();
        debug!(
            events = event_count,
            fragments = text.len(),
            "rendered document"
        );
        text
    }

    /// Stylize an event's payload with its block's base style.
    fn push_text<'a>(&self, out: &mut Output<'a>, event: BlockEvent<'a>) {
        let role = event.kind.style_kind().unwrap_or(StyleKind::Normal);
        let base = self.styles.base(role);

        // A bare heading marker still produces its (empty) heading run.
        if event.text.is_empty() {
            out.fragments.push(Fragment::Run(StyledRun {
                text: event.text,
                style: *base,
                role,
                emphasis: Emphasis::Plain,
            }));
            return;
        }

        match event.text {
            CowStr::Borrowed(text) => out
                .fragments
                .extend(stylize(text, base, role).into_iter().map(Fragment::Run)),
            // Joined paragraphs own their text, so their runs must too.
            CowStr::Owned(text) => out.fragments.extend(
                stylize(&text, base, role)
                    .into_iter()
                    .map(|run| Fragment::Run(run.into_owned())),
            ),
        }
    }
}

#[derive(Default)]
struct Output<'a> {
    fragments: Vec<Fragment<'a>>,
}

impl<'a> Output<'a> {
    fn trailing_breaks(&self) -> usize {
        self.fragments
            .iter()
            .rev()
            .take_while(|fragment| fragment.is_line_break())
            .count()
    }

    fn push_breaks(&mut self, count: usize) {
        self.fragments
            .extend((0..count).map(|_| Fragment::LineBreak));
    }

    fn finish(mut self) -> RichText<'a> {
        collapse_breaks(&mut self.fragments);

        if !self.fragments.is_empty() {
            let missing = MAX_BREAKS.saturating_sub(self.trailing_breaks());
            self.push_breaks(missing);
        }

        RichText {
            fragments: self.fragments,
        }
    }
}

/// Shorten every run of consecutive line breaks to at most [`MAX_BREAKS`].
fn collapse_breaks(fragments: &mut Vec<Fragment<'_>>) {
    let mut run = 0;
    fragments.retain(|fragment| {
        if fragment.is_line_break() {
            run += 1;
            run <= MAX_BREAKS
        } else {
            run = 0;
            true
        }
    });
}
