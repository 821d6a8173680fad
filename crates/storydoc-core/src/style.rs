//! Style model: named base styles and their bold/italic variants.
//!
//! The core never decides what a style looks like. A host supplies one
//! [`TextStyle`] per [`StyleKind`] in a [`StyleSheet`]; the converter only
//! picks the right entry for each block and layers emphasis on top with
//! [`TextStyle::derive`].

use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// The named base styles a document can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StyleKind {
    Title,
    Author,
    Chapter,
    Section,
    /// Body text.
    Normal,
}

impl StyleKind {
    /// All style kinds, in style sheet order.
    pub const ALL: [StyleKind; 5] = [
        StyleKind::Title,
        StyleKind::Author,
        StyleKind::Chapter,
        StyleKind::Section,
        StyleKind::Normal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StyleKind::Title => "title",
            StyleKind::Author => "author",
            StyleKind::Chapter => "chapter",
            StyleKind::Section => "section",
            StyleKind::Normal => "normal",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StyleError::UnknownStyle(s.to_string()))
    }
}

/// Inline emphasis layered on a base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Emphasis {
    /// Literal text in the base style.
    #[default]
    Plain,
    /// `**text**` or `__text__`.
    Bold,
    /// `_text_`.
    Italic,
}

impl Emphasis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Emphasis::Plain => "plain",
            Emphasis::Bold => "bold",
            Emphasis::Italic => "italic",
        }
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight and slant traits of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FontTraits {
    pub bold: bool,
    pub italic: bool,
}

/// A concrete text style: a point size plus font traits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Point size. Always positive and finite when built through [`TextStyle::new`].
    pub size: f32,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub traits: FontTraits,
}

impl TextStyle {
    /// A regular-weight, upright style of the given size.
    pub fn new(size: f32) -> Result<Self, StyleError> {
        if !is_valid_size(size) {
            return Err(StyleError::InvalidSize { size });
        }
        Ok(Self {
            size,
            traits: FontTraits::default(),
        })
    }

    pub fn bold(mut self) -> Self {
        self.traits.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.traits.italic = true;
        self
    }

    /// The variant of this style carrying `emphasis`.
    ///
    /// Adds the bold or italic trait and keeps the size and every trait the
    /// base already has. `Plain` returns the base unchanged.
    ///
    /// ```rust
    /// use storydoc_core::style::{Emphasis, TextStyle};
    ///
    /// let chapter = TextStyle::new(22.0).unwrap().bold();
    /// let emphasized = chapter.derive(Emphasis::Italic);
    /// assert_eq!(emphasized.size, 22.0);
    /// assert!(emphasized.traits.bold && emphasized.traits.italic);
    /// ```
    #[inline]
    pub fn derive(self, emphasis: Emphasis) -> Self {
        match emphasis {
            Emphasis::Plain => self,
            Emphasis::Bold => self.bold(),
            Emphasis::Italic => self.italic(),
        }
    }
}

#[inline]
fn is_valid_size(size: f32) -> bool {
    size.is_finite() && size > 0.0
}

/// One base style per [`StyleKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSheet {
    pub title: TextStyle,
    pub author: TextStyle,
    pub chapter: TextStyle,
    pub section: TextStyle,
    pub normal: TextStyle,
}

impl StyleSheet {
    /// Build a sheet from a lookup function, e.g. a host's font table.
    pub fn from_fn(mut f: impl FnMut(StyleKind) -> TextStyle) -> Self {
        Self {
            title: f(StyleKind::Title),
            author: f(StyleKind::Author),
            chapter: f(StyleKind::Chapter),
            section: f(StyleKind::Section),
            normal: f(StyleKind::Normal),
        }
    }

    /// The base style for `kind`.
    #[inline]
    pub fn base(&self, kind: StyleKind) -> &TextStyle {
        match kind {
            StyleKind::Title => &self.title,
            StyleKind::Author => &self.author,
            StyleKind::Chapter => &self.chapter,
            StyleKind::Section => &self.section,
            StyleKind::Normal => &self.normal,
        }
    }

    #[inline]
    pub fn base_mut(&mut self, kind: StyleKind) -> &mut TextStyle {
        match kind {
            StyleKind::Title => &mut self.title,
            StyleKind::Author => &mut self.author,
            StyleKind::Chapter => &mut self.chapter,
            StyleKind::Section => &mut self.section,
            StyleKind::Normal => &mut self.normal,
        }
    }

    /// The base style for `kind` with `emphasis` applied.
    #[inline]
    pub fn derive(&self, kind: StyleKind, emphasis: Emphasis) -> TextStyle {
        self.base(kind).derive(emphasis)
    }

    /// Check every entry, reporting the first one with an unusable size.
    ///
    /// Sheets deserialized from host configuration bypass [`TextStyle::new`],
    /// so hosts should validate them before rendering.
    pub fn validate(&self) -> Result<(), StyleError> {
        for kind in StyleKind::ALL {
            let size = self.base(kind).size;
            if !is_valid_size(size) {
                return Err(StyleError::InvalidEntry { kind, size });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKind, &TextStyle)> {
        StyleKind::ALL.into_iter().map(move |kind| (kind, self.base(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> StyleSheet {
        StyleSheet::from_fn(|kind| match kind {
            StyleKind::Title => TextStyle::new(28.0).unwrap().bold(),
            StyleKind::Author => TextStyle::new(18.0).unwrap().italic(),
            StyleKind::Chapter => TextStyle::new(22.0).unwrap().bold(),
            StyleKind::Section => TextStyle::new(18.0).unwrap().bold(),
            StyleKind::Normal => TextStyle::new(17.0).unwrap(),
        })
    }

    #[test]
    fn new_rejects_unusable_sizes() {
        assert!(TextStyle::new(12.0).is_ok());
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                TextStyle::new(size),
                Err(StyleError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn derive_keeps_size_and_existing_traits() {
        let sheet = sheet();

        let bold = sheet.derive(StyleKind::Normal, Emphasis::Bold);
        assert_eq!(bold.size, 17.0);
        assert_eq!(bold.traits, FontTraits { bold: true, italic: false });

        let italic_author = sheet.derive(StyleKind::Author, Emphasis::Italic);
        assert_eq!(italic_author, sheet.author);

        let italic_chapter = sheet.derive(StyleKind::Chapter, Emphasis::Italic);
        assert_eq!(italic_chapter.size, 22.0);
        assert_eq!(italic_chapter.traits, FontTraits { bold: true, italic: true });

        assert_eq!(sheet.derive(StyleKind::Section, Emphasis::Plain), sheet.section);
    }

    #[test]
    fn derive_does_not_touch_the_sheet() {
        let sheet = sheet();
        let _ = sheet.derive(StyleKind::Normal, Emphasis::Italic);
        assert!(!sheet.normal.traits.italic);
    }

    #[test]
    fn validate_reports_first_bad_entry() {
        let mut sheet = sheet();
        assert!(sheet.validate().is_ok());

        sheet.base_mut(StyleKind::Section).size = 0.0;
        sheet.normal.size = f32::NAN;
        assert_eq!(
            sheet.validate(),
            Err(StyleError::InvalidEntry {
                kind: StyleKind::Section,
                size: 0.0
            })
        );
    }

    #[test]
    fn style_kind_names_round_trip() {
        for kind in StyleKind::ALL {
            assert_eq!(kind.to_string().parse::<StyleKind>(), Ok(kind));
        }
        assert_eq!("Chapter".parse::<StyleKind>(), Ok(StyleKind::Chapter));
        assert!(matches!(
            "heading".parse::<StyleKind>(),
            Err(StyleError::UnknownStyle(name)) if name == "heading"
        ));
    }
}
