//! # StoryDoc Core
//!
//! Converts lightly marked-up manuscripts into styled text runs.
//!
//! A document is plain text with a handful of line markers (`# Title: `,
//! `## Author: `, `## Year: `, `## ` chapters, `*3*` sections, `-------`
//! separators) and inline `**bold**`, `__bold__` and `_italic_` spans. The
//! core classifies lines into blocks, stylizes each block's text, and joins
//! everything into a flat sequence of runs and line breaks that any text
//! renderer can draw.
//!
//! ## Quick Start
//!
//! ```rust
//! use storydoc_core::{render, Fragment, StyleKind, StyleSheet, TextStyle};
//!
//! let styles = StyleSheet::from_fn(|kind| match kind {
//!     StyleKind::Title => TextStyle::new(28.0).unwrap().bold(),
//!     _ => TextStyle::new(17.0).unwrap(),
//! });
//!
//! let input = "# Title: Inferno\n\nMidway upon the **journey** of our life";
//! let text = render(input, &styles);
//!
//! for fragment in &text {
//!     match fragment {
//!         Fragment::Run(run) => print!("[{} {}]", run.emphasis, run.text),
//!         Fragment::LineBreak => println!(),
//!     }
//! }
//! ```
//!
//! ## Totality
//!
//! Conversion never fails. Markers that don't close, stray `*` and `_`, and
//! unsupported Markdown pass through as literal text. Only style sheet
//! construction returns errors ([`StyleError`]).
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the style model and block kinds,
//!   so hosts can load style sheets from configuration files.

pub mod ast;
pub mod block;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod render;
pub mod span;
pub mod style;

pub use ast::{BlockEvent, BlockKind, Fragment, RichText, StyledRun};
pub use block::classify;
pub use error::StyleError;
pub use inline::stylize;
pub use render::{render, Renderer};
pub use style::{Emphasis, FontTraits, StyleKind, StyleSheet, TextStyle};
