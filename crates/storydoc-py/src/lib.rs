//! Python bindings for StoryDoc.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::IntoPyObjectExt;
use storydoc_core::{
    span::Span as CoreSpan, BlockEvent as CoreBlockEvent, BlockKind as CoreBlockKind,
    Emphasis as CoreEmphasis, FontTraits, Fragment, Renderer, StyleError, StyleKind,
    StyleSheet as CoreStyleSheet, StyledRun as CoreStyledRun, TextStyle as CoreTextStyle,
};

fn value_error(e: StyleError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ============================================================================
// Span
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "Span")]
#[derive(Clone)]
pub struct PySpan {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PySpan {
    fn __repr__(&self) -> String {
        format!("Span({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<CoreSpan> for PySpan {
    fn from(s: CoreSpan) -> Self {
        PySpan {
            start: s.start,
            end: s.end,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Structural kind of a block.
#[pyclass(frozen, eq, eq_int, name = "BlockKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyBlockKind {
    Title,
    Author,
    Year,
    Chapter,
    Section,
    Separator,
    Paragraph,
    Blank,
}

impl From<CoreBlockKind> for PyBlockKind {
    fn from(k: CoreBlockKind) -> Self {
        match k {
            CoreBlockKind::Title => PyBlockKind::Title,
            CoreBlockKind::Author => PyBlockKind::Author,
            CoreBlockKind::Year => PyBlockKind::Year,
            CoreBlockKind::Chapter => PyBlockKind::Chapter,
            CoreBlockKind::Section => PyBlockKind::Section,
            CoreBlockKind::Separator => PyBlockKind::Separator,
            CoreBlockKind::Paragraph => PyBlockKind::Paragraph,
            CoreBlockKind::Blank => PyBlockKind::Blank,
        }
    }
}

/// Inline emphasis of a run.
#[pyclass(frozen, eq, eq_int, name = "Emphasis")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyEmphasis {
    Plain,
    Bold,
    Italic,
}

impl From<CoreEmphasis> for PyEmphasis {
    fn from(e: CoreEmphasis) -> Self {
        match e {
            CoreEmphasis::Plain => PyEmphasis::Plain,
            CoreEmphasis::Bold => PyEmphasis::Bold,
            CoreEmphasis::Italic => PyEmphasis::Italic,
        }
    }
}

// ============================================================================
// Styles
// ============================================================================

/// A font size plus bold/italic traits.
///
/// Args:
///     size: Point size, positive and finite
///     bold: Bold weight (default: False)
///     italic: Italic slant (default: False)
///
/// Raises:
///     ValueError: If size is zero, negative, NaN or infinite
#[pyclass(frozen, get_all, name = "TextStyle")]
#[derive(Clone, Copy)]
pub struct PyTextStyle {
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

#[pymethods]
impl PyTextStyle {
    #[new]
    #[pyo3(
        signature = (size, bold=false, italic=false),
        text_signature = "(size, bold=False, italic=False)"
    )]
    fn new(size: f32, bold: bool, italic: bool) -> PyResult<Self> {
        let style = CoreTextStyle::new(size).map_err(value_error)?;
        Ok(CoreTextStyle {
            traits: FontTraits { bold, italic },
            ..style
        }
        .into())
    }

    fn __repr__(&self) -> String {
        format!(
            "TextStyle({}, bold={}, italic={})",
            self.size,
            py_bool(self.bold),
            py_bool(self.italic)
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        CoreTextStyle::from(*self) == CoreTextStyle::from(*other)
    }
}

impl From<CoreTextStyle> for PyTextStyle {
    fn from(s: CoreTextStyle) -> Self {
        PyTextStyle {
            size: s.size,
            bold: s.traits.bold,
            italic: s.traits.italic,
        }
    }
}

impl From<PyTextStyle> for CoreTextStyle {
    fn from(s: PyTextStyle) -> Self {
        CoreTextStyle {
            size: s.size,
            traits: FontTraits {
                bold: s.bold,
                italic: s.italic,
            },
        }
    }
}

fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// One base style per role.
///
/// Args:
///     title, author, chapter, section, normal: TextStyle values
#[pyclass(frozen, get_all, name = "StyleSheet")]
#[derive(Clone)]
pub struct PyStyleSheet {
    pub title: PyTextStyle,
    pub author: PyTextStyle,
    pub chapter: PyTextStyle,
    pub section: PyTextStyle,
    pub normal: PyTextStyle,
}

#[pymethods]
impl PyStyleSheet {
    #[new]
    #[pyo3(text_signature = "(title, author, chapter, section, normal)")]
    fn new(
        title: PyTextStyle,
        author: PyTextStyle,
        chapter: PyTextStyle,
        section: PyTextStyle,
        normal: PyTextStyle,
    ) -> Self {
        PyStyleSheet {
            title,
            author,
            chapter,
            section,
            normal,
        }
    }

    /// The built-in sheet: title 28 bold, author 18 italic, chapter 22 bold,
    /// section 18 bold, normal 17.
    #[staticmethod]
    fn default() -> Self {
        default_styles().into()
    }

    fn __repr__(&self) -> String {
        format!(
            "StyleSheet(title={}, author={}, chapter={}, section={}, normal={})",
            self.title.__repr__(),
            self.author.__repr__(),
            self.chapter.__repr__(),
            self.section.__repr__(),
            self.normal.__repr__()
        )
    }
}

impl From<CoreStyleSheet> for PyStyleSheet {
    fn from(s: CoreStyleSheet) -> Self {
        PyStyleSheet {
            title: s.title.into(),
            author: s.author.into(),
            chapter: s.chapter.into(),
            section: s.section.into(),
            normal: s.normal.into(),
        }
    }
}

impl From<&PyStyleSheet> for CoreStyleSheet {
    fn from(s: &PyStyleSheet) -> Self {
        CoreStyleSheet {
            title: s.title.into(),
            author: s.author.into(),
            chapter: s.chapter.into(),
            section: s.section.into(),
            normal: s.normal.into(),
        }
    }
}

fn default_styles() -> CoreStyleSheet {
    let style = |size: f32| CoreTextStyle {
        size,
        traits: FontTraits::default(),
    };

    CoreStyleSheet {
        title: style(28.0).bold(),
        author: style(18.0).italic(),
        chapter: style(22.0).bold(),
        section: style(18.0).bold(),
        normal: style(17.0),
    }
}

// ============================================================================
// Output types
// ============================================================================

/// A classified block.
#[pyclass(frozen, get_all, name = "BlockEvent")]
pub struct PyBlockEvent {
    pub kind: PyBlockKind,
    pub text: String,
    pub span: PySpan,
}

#[pymethods]
impl PyBlockEvent {
    fn __repr__(&self) -> String {
        format!("BlockEvent({:?}, {:?})", self.kind, self.text)
    }
}

impl From<CoreBlockEvent<'_>> for PyBlockEvent {
    fn from(e: CoreBlockEvent<'_>) -> Self {
        PyBlockEvent {
            kind: e.kind.into(),
            text: e.text.into_owned(),
            span: e.span.into(),
        }
    }
}

/// Text sharing one style.
#[pyclass(frozen, get_all, name = "StyledRun")]
pub struct PyStyledRun {
    pub text: String,
    pub style: PyTextStyle,
    /// Role name: "title", "author", "chapter", "section" or "normal".
    pub role: String,
    pub emphasis: PyEmphasis,
}

#[pymethods]
impl PyStyledRun {
    fn __repr__(&self) -> String {
        format!(
            "StyledRun({:?}, role={:?}, emphasis={:?})",
            self.text, self.role, self.emphasis
        )
    }
}

impl From<CoreStyledRun<'_>> for PyStyledRun {
    fn from(r: CoreStyledRun<'_>) -> Self {
        PyStyledRun {
            text: r.text.into_owned(),
            style: r.style.into(),
            role: r.role.as_str().to_string(),
            emphasis: r.emphasis.into(),
        }
    }
}

/// A line break between runs.
#[pyclass(frozen, name = "LineBreak")]
pub struct PyLineBreak;

#[pymethods]
impl PyLineBreak {
    fn __repr__(&self) -> &'static str {
        "LineBreak()"
    }
}

fn convert_fragment(py: Python<'_>, fragment: Fragment<'_>) -> PyResult<PyObject> {
    match fragment {
        Fragment::Run(run) => PyStyledRun::from(run).into_py_any(py),
        Fragment::LineBreak => PyLineBreak.into_py_any(py),
    }
}

fn resolve_styles(styles: Option<&PyStyleSheet>) -> PyResult<CoreStyleSheet> {
    let Some(styles) = styles else {
        return Ok(default_styles());
    };
    let sheet = CoreStyleSheet::from(styles);
    sheet.validate().map_err(value_error)?;
    Ok(sheet)
}

// ============================================================================
// Module functions
// ============================================================================

/// Classify a document into block events.
///
/// Args:
///     input: Document string
///
/// Returns:
///     list[BlockEvent]: Blocks in document order
#[pyfunction]
#[pyo3(text_signature = "(input)")]
fn classify(input: &str) -> Vec<PyBlockEvent> {
    storydoc_core::classify(input)
        .into_iter()
        .map(PyBlockEvent::from)
        .collect()
}

/// Split text into styled runs on `**bold**`, `__bold__` and `_italic_`.
///
/// Args:
///     text: Text to stylize
///     style: Base TextStyle
///     role: Role name recorded on each run (default: "normal")
///
/// Returns:
///     list[StyledRun]: Runs in text order
///
/// Raises:
///     ValueError: On an unknown role name
#[pyfunction]
#[pyo3(signature = (text, style, role="normal"), text_signature = "(text, style, role=\"normal\")")]
fn stylize(text: &str, style: PyTextStyle, role: &str) -> PyResult<Vec<PyStyledRun>> {
    let role: StyleKind = role.parse().map_err(value_error)?;
    let base = CoreTextStyle::from(style);
    Ok(storydoc_core::stylize(text, &base, role)
        .into_iter()
        .map(PyStyledRun::from)
        .collect())
}

/// Render a document into styled runs and line breaks.
///
/// Args:
///     input: Document string
///     styles: StyleSheet (default: StyleSheet.default())
///
/// Returns:
///     list[StyledRun | LineBreak]: Output in document order
///
/// Raises:
///     ValueError: If a style sheet entry has an unusable size
#[pyfunction]
#[pyo3(signature = (input, styles=None), text_signature = "(input, styles=None)")]
fn render(
    py: Python<'_>,
    input: &str,
    styles: Option<PyRef<'_, PyStyleSheet>>,
) -> PyResult<Vec<PyObject>> {
    let sheet = resolve_styles(styles.as_deref())?;
    Renderer::new(&sheet)
        .render(input)
        .into_iter()
        .map(|fragment| convert_fragment(py, fragment))
        .collect()
}

/// Render a document and return only its text, with breaks as newlines.
#[pyfunction]
#[pyo3(text_signature = "(input)")]
fn plain_text(input: &str) -> String {
    storydoc_core::render(input, &default_styles()).plain_text()
}

// ============================================================================
// Module
// ============================================================================

/// StoryDoc - manuscript markup to styled text runs.
#[pymodule]
fn pysd(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySpan>()?;
    m.add_class::<PyBlockKind>()?;
    m.add_class::<PyEmphasis>()?;
    m.add_class::<PyTextStyle>()?;
    m.add_class::<PyStyleSheet>()?;
    m.add_class::<PyBlockEvent>()?;
    m.add_class::<PyStyledRun>()?;
    m.add_class::<PyLineBreak>()?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(stylize, m)?)?;
    m.add_function(wrap_pyfunction!(render, m)?)?;
    m.add_function(wrap_pyfunction!(plain_text, m)?)?;
    Ok(())
}
