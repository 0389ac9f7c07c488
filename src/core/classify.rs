//! Annotation classifier.
//!
//! Classifies the stripped text of a single comment line. Pure and stateless: it never
//! looks beyond the line it is given.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::MarkerKeyword;

// `TODO: {` with nothing but whitespace after the brace.
static BRACE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TODO\s*:\s*\{\s*$").unwrap());

// Capture group 1: keyword, group 2: inline text (may be empty).
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(TODO|FIXME|XXX)\s*:\s*(.*)$").unwrap());

static COLLECTION_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TODOS\.START\s*$").unwrap());

static COLLECTION_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TODOS\.END\s*$").unwrap());

/// Classification of one comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// `KEYWORD: text`. `offset` is the byte offset of `text` within the comment text.
    Marker {
        keyword: MarkerKeyword,
        text: &'a str,
        offset: usize,
    },
    /// `TODO: {`
    BraceOpen,
    /// A line that is exactly `}`.
    BraceClose,
    /// `TODOS.START`
    CollectionOpen,
    /// `TODOS.END`
    CollectionClose,
    /// Anything else. Not an annotation on its own, but body content inside a block.
    Prose,
}

pub struct AnnotationClassifier;

impl AnnotationClassifier {
    /// Classify the stripped text of a comment line.
    ///
    /// Only `TODO` opens a brace block. `FIXME: {` and `XXX: {` are prose.
    pub fn classify(text: &str) -> Classification<'_> {
        let text = text.trim();

        if BRACE_OPEN_REGEX.is_match(text) {
            return Classification::BraceOpen;
        }

        if let Some(captures) = MARKER_REGEX.captures(text)
            && let (Some(word), Some(inline)) = (captures.get(1), captures.get(2))
            && inline.as_str() != "{"
            && let Some(keyword) = MarkerKeyword::from_keyword(word.as_str())
        {
            return Classification::Marker {
                keyword,
                text: inline.as_str(),
                offset: inline.start(),
            };
        }

        if text == "}" {
            return Classification::BraceClose;
        }

        if COLLECTION_OPEN_REGEX.is_match(text) {
            return Classification::CollectionOpen;
        }

        if COLLECTION_CLOSE_REGEX.is_match(text) {
            return Classification::CollectionClose;
        }

        Classification::Prose
    }
}
