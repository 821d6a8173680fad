//! Property-based tests for the inline stylist and the assembler
//!
//! The stylist is checked against the equivalent `regex` alternation, which
//! defines the matching rules: lazy bold, underscore-free italic, leftmost
//! match first.

use proptest::prelude::*;
use regex::Regex;
use storydoc_core::{render, stylize, Emphasis, Fragment, StyleKind, StyleSheet, TextStyle};

fn oracle(text: &str) -> Vec<(String, Emphasis)> {
    let re = Regex::new(r"\*\*(.*?)\*\*|__(.*?)__|_([^_]+)_").unwrap();
    let mut out = Vec::new();
    let mut cursor = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if cursor < whole.start() {
            out.push((text[cursor..whole.start()].to_string(), Emphasis::Plain));
        }
        let (content, emphasis) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(m), _, _) | (_, Some(m), _) => (m.as_str(), Emphasis::Bold),
            (_, _, Some(m)) => (m.as_str(), Emphasis::Italic),
            _ => unreachable!(),
        };
        if !content.is_empty() {
            out.push((content.to_string(), emphasis));
        }
        cursor = whole.end();
    }

    if cursor < text.len() {
        out.push((text[cursor..].to_string(), Emphasis::Plain));
    }
    out
}

fn styled(text: &str) -> Vec<(String, Emphasis)> {
    let base = TextStyle::new(17.0).unwrap();
    stylize(text, &base, StyleKind::Normal)
        .into_iter()
        .map(|run| (run.text.into_owned(), run.emphasis))
        .collect()
}

fn styles() -> StyleSheet {
    StyleSheet::from_fn(|_| TextStyle::new(17.0).unwrap())
}

proptest! {
    #[test]
    fn stylize_matches_regex_alternation(text in "[ab *_\n]{0,40}") {
        prop_assert_eq!(styled(&text), oracle(&text));
    }

    #[test]
    fn stylize_matches_regex_on_unicode(text in "[\\PC*_]{0,30}") {
        prop_assert_eq!(styled(&text), oracle(&text));
    }

    #[test]
    fn stylize_only_drops_delimiters(text in "\\PC{0,60}") {
        let joined: String = styled(&text).into_iter().map(|(t, _)| t).collect();
        prop_assert!(joined.len() <= text.len());

        // With no delimiter characters present, the text passes through untouched.
        if !text.contains(['*', '_']) {
            prop_assert_eq!(joined, text);
        }
    }

    #[test]
    fn render_never_stacks_three_breaks(
        doc in "(# Title: x|## Author: y|## Year: 1|## c|-------|\\*1\\*|[ab _*]{0,8}|\n){0,24}"
    ) {
        let styles = styles();
        let text = render(&doc, &styles);

        let mut run = 0;
        for fragment in &text {
            if matches!(fragment, Fragment::LineBreak) {
                run += 1;
                prop_assert!(run <= 2);
            } else {
                run = 0;
            }
        }

        if !text.is_empty() {
            prop_assert_eq!(text.trailing_breaks(), 2);
        }
        // Only a bare heading marker may leave an empty run behind.
        prop_assert!(text
            .runs()
            .all(|r| !r.text.is_empty() || r.role != StyleKind::Normal));
    }
}
