//! Errors for style configuration.
//!
//! Converting a document never fails: malformed markup degrades to literal
//! text. The only fallible operations are the ones that build or validate a
//! [`StyleSheet`](crate::style::StyleSheet) supplied by a host.

use thiserror::Error;

use crate::style::StyleKind;

/// A style configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// A font size that is zero, negative, NaN or infinite.
    #[error("invalid font size {size}: must be a positive finite number")]
    InvalidSize { size: f32 },

    /// A style sheet entry with an unusable size.
    #[error("invalid {kind} style: font size {size} must be a positive finite number")]
    InvalidEntry { kind: StyleKind, size: f32 },

    /// A style name that is not one of title, author, chapter, section, normal.
    #[error("unknown style name: {0:?}")]
    UnknownStyle(String),
}

impl StyleError {
    /// The style sheet entry this error refers to, if any.
    pub fn kind(&self) -> Option<StyleKind> {
        match self {
            StyleError::InvalidEntry { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_entry() {
        let err = StyleError::InvalidEntry {
            kind: StyleKind::Chapter,
            size: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid chapter style: font size -2 must be a positive finite number"
        );
        assert_eq!(err.kind(), Some(StyleKind::Chapter));

        let err = StyleError::UnknownStyle("heading".into());
        assert_eq!(err.to_string(), "unknown style name: \"heading\"");
        assert_eq!(err.kind(), None);
    }
}
