//! Types produced by the converter.
//!
//! - [`BlockEvent`]: one structural unit found by the block classifier.
//! - [`StyledRun`]: a text fragment sharing one style.
//! - [`RichText`]: the final flat sequence of runs and line breaks.
//!
//! Text is `Cow<'a, str>` throughout: it borrows from the input where the
//! source already holds the exact characters and is owned only where lines
//! had to be joined.

use std::fmt;

use crate::span::Span;
use crate::style::{Emphasis, StyleKind, TextStyle};

/// Borrowed or owned string type for zero-copy conversion.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Structural classification of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BlockKind {
    /// `# Title: ...`
    Title,
    /// `## Author: ...`
    Author,
    /// `## Year: ...`, parsed but never rendered.
    Year,
    /// `## ...`
    Chapter,
    /// `*12*`
    Section,
    /// `-------`
    Separator,
    /// One or more consecutive plain lines.
    Paragraph,
    /// An empty or whitespace-only line.
    Blank,
}

impl BlockKind {
    /// The base style used for this block's text, or `None` for blocks that
    /// render no text.
    pub const fn style_kind(self) -> Option<StyleKind> {
        match self {
            BlockKind::Title => Some(StyleKind::Title),
            BlockKind::Author => Some(StyleKind::Author),
            BlockKind::Chapter => Some(StyleKind::Chapter),
            BlockKind::Section => Some(StyleKind::Section),
            BlockKind::Paragraph => Some(StyleKind::Normal),
            BlockKind::Year | BlockKind::Separator | BlockKind::Blank => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Author => "author",
            BlockKind::Year => "year",
            BlockKind::Chapter => "chapter",
            BlockKind::Section => "section",
            BlockKind::Separator => "separator",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Blank => "blank",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block found by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEvent<'a> {
    pub kind: BlockKind,
    /// Payload text: the heading remainder, the section marker, or the
    /// joined paragraph. Empty for separators and blank lines.
    pub text: CowStr<'a>,
    /// Source lines this block was built from.
    pub span: Span,
}

impl<'a> BlockEvent<'a> {
    #[inline]
    pub fn new(kind: BlockKind, text: impl Into<CowStr<'a>>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Detach from the input.
    pub fn into_owned(self) -> BlockEvent<'static> {
        BlockEvent {
            kind: self.kind,
            text: CowStr::Owned(self.text.into_owned()),
            span: self.span,
        }
    }
}

/// A contiguous text fragment sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun<'a> {
    pub text: CowStr<'a>,
    /// Resolved style: the role's base style with `emphasis` applied.
    pub style: TextStyle,
    /// Which base style the run was derived from.
    pub role: StyleKind,
    pub emphasis: Emphasis,
}

impl<'a> StyledRun<'a> {
    pub fn into_owned(self) -> StyledRun<'static> {
        StyledRun {
            text: CowStr::Owned(self.text.into_owned()),
            style: self.style,
            role: self.role,
            emphasis: self.emphasis,
        }
    }
}

/// One element of the rendered output.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<'a> {
    Run(StyledRun<'a>),
    LineBreak,
}

impl<'a> Fragment<'a> {
    #[inline]
    pub fn is_line_break(&self) -> bool {
        matches!(self, Fragment::LineBreak)
    }

    pub fn into_owned(self) -> Fragment<'static> {
        match self {
            Fragment::Run(run) => Fragment::Run(run.into_owned()),
            Fragment::LineBreak => Fragment::LineBreak,
        }
    }
}

/// The converted document: styled runs and explicit line breaks in
/// document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichText<'a> {
    pub fragments: Vec<Fragment<'a>>,
}

impl<'a> RichText<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The styled runs, skipping line breaks.
    pub fn runs(&self) -> impl Iterator<Item = &StyledRun<'a>> {
        self.fragments.iter().filter_map(|fragment| match fragment {
            Fragment::Run(run) => Some(run),
            Fragment::LineBreak => None,
        })
    }

    /// Number of line breaks at the end of the output.
    pub fn trailing_breaks(&self) -> usize {
        self.fragments
            .iter()
            .rev()
            .take_while(|fragment| fragment.is_line_break())
            .count()
    }

    /// The text with styles dropped and line breaks as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Run(run) => out.push_str(&run.text),
                Fragment::LineBreak => out.push('\n'),
            }
        }
        out
    }

    pub fn into_owned(self) -> RichText<'static> {
        RichText {
            fragments: self
                .fragments
                .into_iter()
                .map(Fragment::into_owned)
                .collect(),
        }
    }
}

impl<'a> IntoIterator for RichText<'a> {
    type Item = Fragment<'a>;
    type IntoIter = std::vec::IntoIter<Fragment<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a, 'r> IntoIterator for &'r RichText<'a> {
    type Item = &'r Fragment<'a>;
    type IntoIter = std::slice::Iter<'r, Fragment<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
